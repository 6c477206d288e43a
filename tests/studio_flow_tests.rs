// Host-side scenarios for the studio controller: stages, overlays, snake and menu.

use studio_core::overlay::{OverlayKind, Presence};
use studio_core::snake::Direction;
use studio_core::{AudioRequest, Cue, ScrollConfig, Stage, Studio};

fn studio() -> Studio {
    Studio::new(ScrollConfig::default(), 42)
}

fn played(reqs: &[AudioRequest]) -> Vec<Cue> {
    reqs.iter()
        .filter_map(|r| match r {
            AudioRequest::Play(c) => Some(*c),
            AudioRequest::ToggleMute => None,
        })
        .collect()
}

/// Scrolls to the play stage, waiting out each read lock. Returns the time
/// at which the guidance overlay has settled.
fn reach_play(s: &mut Studio) -> f64 {
    assert_eq!(s.on_wheel(250.0, 0.0), Some(Stage::WARNING));
    s.tick(2400.0);
    assert_eq!(s.on_wheel(250.0, 2400.0), Some(Stage::INTRO));
    s.tick(5500.0);
    assert_eq!(s.on_wheel(250.0, 5500.0), Some(Stage::PLAY));
    s.tick(6350.0);
    6350.0
}

#[test]
fn first_scroll_runs_the_warning_choreography() {
    let mut s = studio();
    assert_eq!(s.on_wheel(250.0, 0.0), Some(Stage::WARNING));
    assert_eq!(played(&s.drain_cues()), vec![Cue::Scroll]);
    assert!(s.locked());

    s.tick(399.0);
    assert_eq!(s.overlay_presence(OverlayKind::Warning), Presence::Hidden);
    s.tick(400.0);
    assert_eq!(s.overlay_presence(OverlayKind::Warning), Presence::Entering);
    assert_eq!(played(&s.drain_cues()), vec![Cue::Warning]);
    s.tick(450.0);
    assert_eq!(s.overlay_presence(OverlayKind::Warning), Presence::Visible);

    s.tick(2399.0);
    assert!(s.locked());
    s.tick(2400.0);
    assert!(!s.locked());

    s.tick(5399.0);
    assert_eq!(s.overlay_presence(OverlayKind::Warning), Presence::Visible);
    s.tick(5400.0);
    assert_eq!(s.overlay_presence(OverlayKind::Warning), Presence::Exiting);
    s.tick(5700.0);
    assert_eq!(s.overlay_presence(OverlayKind::Warning), Presence::Hidden);
    assert!(s.overlay().is_none());
}

#[test]
fn wheel_waits_for_the_read_lock() {
    let mut s = studio();
    s.on_wheel(250.0, 0.0);
    s.tick(1000.0);
    assert_eq!(s.on_wheel(500.0, 1000.0), None);
    assert_eq!(s.stage(), Stage::WARNING);

    s.tick(2400.0);
    assert_eq!(s.on_wheel(250.0, 2400.0), Some(Stage::INTRO));
}

#[test]
fn scrolling_back_to_start_clears_overlays() {
    let mut s = studio();
    s.on_wheel(250.0, 0.0);
    s.tick(2400.0);
    assert_eq!(s.overlay_presence(OverlayKind::Warning), Presence::Visible);

    assert_eq!(s.on_wheel(-250.0, 2400.0), Some(Stage::START));
    assert!(s.overlay().is_none());
    assert!(!s.locked());
    // nothing before the first stage
    assert_eq!(s.on_wheel(-500.0, 4000.0), None);
}

#[test]
fn touch_drag_steps_once_per_threshold() {
    let mut s = studio();
    s.on_touch_start(600.0);
    assert_eq!(s.on_touch_drag(500.0, 0.0), None);
    assert_eq!(s.on_touch_drag(340.0, 16.0), Some(Stage::WARNING));
    assert_eq!(s.scroll_offset(), 260.0);
    s.on_touch_end();
}

#[test]
fn dismissing_without_an_overlay_is_a_no_op() {
    let mut s = studio();
    assert!(!s.dismiss_overlay(0.0));

    s.on_wheel(250.0, 0.0);
    s.tick(450.0);
    assert!(s.dismiss_overlay(1000.0));
    assert_eq!(s.overlay_presence(OverlayKind::Warning), Presence::Exiting);
    s.tick(1300.0);
    assert_eq!(s.overlay_presence(OverlayKind::Warning), Presence::Hidden);
    assert!(!s.dismiss_overlay(1400.0));
}

#[test]
fn guidance_enables_the_play_button() {
    let mut s = studio();
    let _ = reach_play(&mut s);
    assert_eq!(s.overlay_presence(OverlayKind::Guidance), Presence::Visible);
    assert!(s.play_button_active());
    s.drain_cues();

    s.hover_play();
    assert!(s.open_snake());
    assert_eq!(played(&s.drain_cues()), vec![Cue::Hover, Cue::Click]);
    assert!(!s.play_button_active());
    assert!(!s.open_snake());
}

#[test]
fn clicking_guidance_keeps_the_play_button_alive() {
    let mut s = studio();
    let t = reach_play(&mut s);
    assert!(!s.dismiss_overlay(t + 650.0));
    s.tick(60_000.0);
    assert_eq!(s.overlay_presence(OverlayKind::Guidance), Presence::Visible);
    assert_eq!(s.stage(), Stage::PLAY);
    assert!(s.play_button_active());
}

#[test]
fn snake_keys_are_routed_to_the_game() {
    let mut s = studio();
    reach_play(&mut s);
    s.open_snake();
    s.drain_cues();

    // steering before the start is consumed but does nothing
    assert!(s.on_key("ArrowLeft"));
    assert!(s.drain_cues().is_empty());

    assert!(s.on_key("Enter"));
    assert!(s.snake().is_some_and(|g| g.started()));
    assert!(s.on_key("ArrowLeft"));
    assert_eq!(played(&s.drain_cues()), vec![Cue::Success, Cue::SnakeMove]);

    assert!(s.on_key("Escape"));
    assert!(s.snake().is_none());
    assert!(s.play_button_active());
}

#[test]
fn mute_key_requests_a_toggle() {
    let mut s = studio();
    assert!(s.on_key("m"));
    assert!(s.on_key("M"));
    assert_eq!(
        s.drain_cues(),
        vec![AudioRequest::ToggleMute, AudioRequest::ToggleMute]
    );
    assert!(!s.on_key("q"));
}

// Greedy chase toward the food; detours sideways when the wanted turn is a
// reversal.
fn chase(s: &mut Studio) {
    let Some(game) = s.snake() else {
        return;
    };
    let (head, food, current) = (game.head(), game.food(), game.direction());
    let want = if head.x < food.x {
        Direction::Right
    } else if head.x > food.x {
        Direction::Left
    } else if head.y < food.y {
        Direction::Down
    } else {
        Direction::Up
    };
    if want == current || s.steer_snake(want) {
        return;
    }
    let detour = if current.is_vertical() {
        if head.x < 10 { Direction::Right } else { Direction::Left }
    } else if head.y < 10 {
        Direction::Down
    } else {
        Direction::Up
    };
    s.steer_snake(detour);
}

#[test]
fn winning_the_snake_opens_the_menu_and_closing_restarts() {
    let mut s = studio();
    let mut now = reach_play(&mut s);
    s.open_snake();
    s.start_snake();

    for _ in 0..400 {
        if s.game_completed() {
            break;
        }
        chase(&mut s);
        now += 150.0;
        s.tick(now);
        s.frame(0.15);
    }
    assert!(s.game_completed());
    assert!(s.snake().is_none());
    assert!(s.menu().is_open());
    let cues = played(&s.drain_cues());
    assert!(cues.contains(&Cue::SnakeEat));
    assert_eq!(cues.last(), Some(&Cue::SnakeWin));
    assert!(!s.play_button_active());
    assert!(!s.overlay_presence(OverlayKind::Guidance).is_shown());

    // wheel is held while the menu is up
    assert_eq!(s.on_wheel(-500.0, now + 5000.0), None);

    assert!(s.on_key("ArrowDown"));
    assert_eq!(s.menu().selected(), 1);
    assert!(s.on_key("Enter"));
    assert!(s.menu().showing_details());
    assert!(s.on_key("Escape"));
    assert!(!s.menu().showing_details());
    assert!(s.on_key("Escape"));

    assert!(!s.menu().is_open());
    assert!(!s.game_completed());
    assert_eq!(s.stage(), Stage::START);
    assert!(s.overlay().is_none());
}

#[test]
fn menu_pointer_choice_and_back() {
    let mut s = studio();
    // menu clicks mean nothing while it is closed
    s.menu_choose(2);
    assert!(s.drain_cues().is_empty());
    s.menu_back();
    assert!(!s.menu().showing_details());
}

#[test]
fn camera_follows_the_stage() {
    let mut s = studio();
    let start = s.camera();
    s.on_wheel(250.0, 0.0);
    for _ in 0..120 {
        s.frame(1.0 / 60.0);
    }
    let target = studio_core::stage_pose(Stage::WARNING);
    let before = (target.position - start.position).length();
    let after = (target.position - s.camera().position).length();
    assert!(after < before * 0.1, "before={before} after={after}");
}

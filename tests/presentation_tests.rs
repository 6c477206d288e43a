// Host-side tests for the scene geometry, camera, decor layers and config.

use glam::Vec2;
use studio_core::decor::{Corner, CursorTrail, MatrixCorners, RainField, ScrollHint, CORNERS};
use studio_core::scene::{edge_lines, prepare_room, studio_light_rig, studio_room, LightKind};
use studio_core::{
    stage_pose, Camera, CameraRig, ConfigError, ScrollConfig, Stage, CORNER_REGEN_MS,
    INITIAL_CAMERA_POSITION, SCROLL_HINT_MS, TRAIL_MAX_PARTICLES, TRAIL_MAX_POINTS,
};

#[test]
fn room_edges_cover_every_mesh() {
    let room = prepare_room(studio_room());
    let lines = edge_lines(&room, &studio_light_rig());
    assert_eq!(lines.len(), room.meshes.len() * 24);
    assert!(lines
        .iter()
        .all(|v| v.position.iter().chain(v.color.iter()).all(|c| c.is_finite())));
    // shaded edges are not all black
    assert!(lines.iter().any(|v| v.color[0] + v.color[1] + v.color[2] > 0.01));
}

#[test]
fn baked_lights_do_not_contribute_after_preparation() {
    let rig = studio_light_rig();
    let raw = studio_room();
    let prepared = prepare_room(raw.clone());
    assert!(!raw.lights.is_empty());
    assert!(prepared.lights.iter().all(|l| l.intensity == 0.0));

    let mut stripped = prepared.clone();
    stripped.lights.clear();
    assert_eq!(edge_lines(&prepared, &rig), edge_lines(&stripped, &rig));
}

#[test]
fn light_rig_matches_the_studio_setup() {
    let rig = studio_light_rig();
    let ambient = rig.iter().filter(|l| l.kind == LightKind::Ambient).count();
    let directional = rig.iter().filter(|l| l.kind == LightKind::Directional).count();
    let point = rig
        .iter()
        .filter(|l| matches!(l.kind, LightKind::Point { .. }))
        .count();
    assert_eq!((ambient, directional, point), (1, 2, 6));
}

#[test]
fn camera_rig_starts_below_the_first_pose_and_settles() {
    let mut rig = CameraRig::new();
    assert_eq!(rig.pose().position, INITIAL_CAMERA_POSITION);
    for _ in 0..600 {
        rig.update(Stage::PLAY, 1.0 / 60.0);
    }
    assert!(rig.error(Stage::PLAY) < 1e-2);
    let look = rig.pose().look_at;
    assert!((look - stage_pose(Stage::PLAY).look_at).length() < 1e-2);
}

#[test]
fn camera_settling_does_not_depend_on_frame_rate() {
    let mut fast = CameraRig::new();
    let mut slow = CameraRig::new();
    for _ in 0..120 {
        fast.update(Stage::INTRO, 1.0 / 120.0);
    }
    for _ in 0..30 {
        slow.update(Stage::INTRO, 1.0 / 30.0);
    }
    let d = (fast.pose().position - slow.pose().position).length();
    assert!(d < 0.05, "d={d}");
}

#[test]
fn view_projection_is_finite_for_every_stage() {
    for i in 0..=Stage::LAST {
        let cam = Camera::from_pose(stage_pose(Stage::new(i)), 16.0 / 9.0);
        let m = cam.view_projection();
        assert!(m.to_cols_array().iter().all(|c| c.is_finite()));
    }
}

#[test]
fn cursor_trail_is_bounded_and_fades() {
    let mut trail = CursorTrail::new(3);
    for i in 0..200 {
        trail.on_move(Vec2::new(i as f32, 10.0));
    }
    assert_eq!(trail.points().count(), TRAIL_MAX_POINTS);
    assert!(trail.particles().count() <= TRAIL_MAX_PARTICLES);
    assert_eq!(trail.cursor(), Some(Vec2::new(199.0, 10.0)));

    for _ in 0..40 {
        trail.step();
    }
    assert!(trail.particles().count() == 0);
    assert!(trail.points().all(|p| p.opacity > 0.2));
}

#[test]
fn matrix_corners_fill_each_corner_and_regenerate() {
    let mut corners = MatrixCorners::new(11, 0.0);
    for c in CORNERS {
        assert!((8..=12).contains(&corners.count_in(c)), "{c:?}");
    }
    assert!(corners.glyphs().iter().all(|g| {
        let p = g.position(800.0, 600.0);
        match g.corner {
            Corner::TopLeft => p.x <= 150.0 && p.y <= 150.0,
            Corner::TopRight => p.x >= 650.0 && p.y <= 150.0,
            Corner::BottomLeft => p.x <= 150.0 && p.y >= 450.0,
            Corner::BottomRight => p.x >= 650.0 && p.y >= 450.0,
        }
    }));
    assert!(!corners.tick(CORNER_REGEN_MS - 1.0));
    assert!(corners.tick(CORNER_REGEN_MS));
    assert!(!corners.tick(CORNER_REGEN_MS + 1.0));
}

#[test]
fn rain_respawns_above_the_ground() {
    let mut rain = RainField::new(64, 5);
    for _ in 0..2_000 {
        rain.step();
    }
    assert_eq!(rain.drops().len(), 64);
    assert!(rain.drops().iter().all(|d| d.pos.y >= 0.0 && d.pos.y < 70.0));
    assert!(rain.segments().all(|(top, bottom)| top.y > bottom.y));
}

#[test]
fn scroll_hint_hides_on_wheel_or_timeout() {
    let mut hint = ScrollHint::new(0.0);
    assert!(hint.visible());
    hint.tick(SCROLL_HINT_MS - 1.0);
    assert!(hint.visible());
    hint.tick(SCROLL_HINT_MS);
    assert!(!hint.visible());

    let mut hint = ScrollHint::new(0.0);
    hint.on_wheel();
    assert!(!hint.visible());
}

#[test]
fn partial_config_overrides_merge_over_defaults() {
    let cfg = ScrollConfig::try_from_json(
        r#"{"thresholds":{"play":600},"timings":{"autoHideDelayMs":3000},"messages":{"warning":"hi"}}"#,
    )
    .unwrap();
    let d = ScrollConfig::default();
    assert_eq!(cfg.thresholds.play, 600.0);
    assert_eq!(cfg.thresholds.developer_info, d.thresholds.developer_info);
    assert_eq!(cfg.timings.auto_hide_delay_ms, 3000.0);
    assert_eq!(cfg.timings.warning_delay_ms, d.timings.warning_delay_ms);
    assert_eq!(cfg.messages.warning, "hi");
    assert_eq!(cfg.wheel, d.wheel);
}

#[test]
fn invalid_config_falls_back_to_defaults() {
    assert!(matches!(
        ScrollConfig::try_from_json(r#"{"thresholds":{"play":10}}"#),
        Err(ConfigError::ThresholdsNotAscending(_))
    ));
    assert!(matches!(
        ScrollConfig::try_from_json(r#"{"wheel":{"decayFactor":1.5}}"#),
        Err(ConfigError::DecayFactor(_))
    ));
    assert!(matches!(
        ScrollConfig::try_from_json("{not json"),
        Err(ConfigError::Parse(_))
    ));
    assert_eq!(ScrollConfig::from_json(r#"{"wheel":{"threshold":-5}}"#), ScrollConfig::default());
    assert_eq!(ScrollConfig::from_json(""), ScrollConfig::default());
}

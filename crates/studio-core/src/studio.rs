//! The host: owns every controller and routes input and time into them.
//!
//! Nothing in here talks to the browser. Callers feed wheel/touch/key input
//! and timestamps, then drain the audio requests and read the views.

use crate::audio::Cue;
use crate::camera::{CameraPose, CameraRig};
use crate::config::ScrollConfig;
use crate::menu::{MenuKey, MenuOutcome, RetroMenu};
use crate::overlay::{Choreographer, OverlayKind, OverlayView, Presence};
use crate::snake::{Direction, SnakeGame, SnakeUpdate};
use crate::stage::{Stage, StageController, StageStep};
use crate::wheel::{step_for_offset, ScrollPosition, WheelNormalizer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioRequest {
    Play(Cue),
    ToggleMute,
}

pub struct Studio {
    config: ScrollConfig,
    stages: StageController,
    wheel: WheelNormalizer,
    scroll: ScrollPosition,
    overlays: Choreographer,
    camera: CameraRig,
    snake: Option<SnakeGame>,
    menu: RetroMenu,
    game_completed: bool,
    outbox: Vec<AudioRequest>,
    now_ms: f64,
    seed: u64,
}

impl Studio {
    pub fn new(config: ScrollConfig, seed: u64) -> Self {
        Self {
            stages: StageController::new(),
            wheel: WheelNormalizer::new(config.wheel.clone()),
            scroll: ScrollPosition::default(),
            overlays: Choreographer::new(config.timings.clone()),
            camera: CameraRig::new(),
            snake: None,
            menu: RetroMenu::default(),
            game_completed: false,
            outbox: Vec::new(),
            now_ms: 0.0,
            seed,
            config,
        }
    }

    // ---------------- views ----------------

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stages.stage()
    }

    pub fn locked(&self) -> bool {
        self.overlays.locked()
    }

    pub fn overlay(&self) -> Option<OverlayView> {
        self.overlays.current()
    }

    pub fn overlay_presence(&self, kind: OverlayKind) -> Presence {
        self.overlays.presence_of(kind)
    }

    pub fn snake(&self) -> Option<&SnakeGame> {
        self.snake.as_ref()
    }

    pub fn menu(&self) -> &RetroMenu {
        &self.menu
    }

    pub fn camera(&self) -> CameraPose {
        self.camera.pose()
    }

    pub fn game_completed(&self) -> bool {
        self.game_completed
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll.offset()
    }

    pub fn play_button_active(&self) -> bool {
        self.overlays.presence_of(OverlayKind::Guidance).is_shown()
            && !self.game_completed
            && self.snake.is_none()
    }

    pub fn drain_cues(&mut self) -> Vec<AudioRequest> {
        std::mem::take(&mut self.outbox)
    }

    // ---------------- time ----------------

    /// Fires every overlay/menu deadline that has passed.
    pub fn tick(&mut self, now_ms: f64) {
        self.now_ms = self.now_ms.max(now_ms);
        for kind in self.overlays.tick(now_ms) {
            match kind {
                OverlayKind::Warning => self.cue(Cue::Warning),
                OverlayKind::Intro => self.cue(Cue::Intro),
                OverlayKind::Guidance => {}
            }
        }
        self.menu.tick(now_ms);
    }

    /// Per-frame integration: camera spring and the snake clock.
    pub fn frame(&mut self, dt_sec: f32) {
        self.camera.update(self.stages.stage(), dt_sec);

        let update = match self.snake.as_mut() {
            Some(game) => game.advance(f64::from(dt_sec) * 1000.0),
            None => SnakeUpdate::default(),
        };
        if update.ate {
            self.cue(Cue::SnakeEat);
        }
        if update.completed {
            self.complete_snake();
        }
    }

    // ---------------- scroll ----------------

    pub fn on_wheel(&mut self, delta_y: f64, now_ms: f64) -> Option<Stage> {
        self.now_ms = self.now_ms.max(now_ms);
        if self.modal_open() {
            return None;
        }
        let step = self
            .wheel
            .feed(delta_y, now_ms, self.stages.stage(), self.overlays.locked())?;
        self.commit(step, now_ms)
    }

    pub fn on_touch_start(&mut self, y: f64) {
        self.scroll.begin(y);
    }

    pub fn on_touch_end(&mut self) {
        self.scroll.end();
    }

    pub fn on_touch_drag(&mut self, y: f64, now_ms: f64) -> Option<Stage> {
        self.now_ms = self.now_ms.max(now_ms);
        if self.modal_open() {
            return None;
        }
        let offset = self.scroll.drag(y);
        let step = step_for_offset(offset, self.stages.stage(), &self.config.thresholds)?;
        if !self.wheel.try_commit(now_ms, self.overlays.locked()) {
            return None;
        }
        self.commit(step, now_ms)
    }

    fn commit(&mut self, step: StageStep, now_ms: f64) -> Option<Stage> {
        let from = self.stages.stage();
        if !self.stages.apply(step) {
            return None;
        }
        let to = self.stages.stage();
        log::info!("[stage] {} -> {}", from, to);
        self.cue(Cue::Scroll);
        self.overlays.on_stage_entered(to, now_ms);
        Some(to)
    }

    // ---------------- overlays ----------------

    /// Click dismissal. Guidance stays up until the game completes or the
    /// stage drops below play.
    pub fn dismiss_overlay(&mut self, now_ms: f64) -> bool {
        match self.overlays.current() {
            Some(v) if v.kind.auto_hides() => self.overlays.dismiss(now_ms),
            _ => false,
        }
    }

    // ---------------- snake ----------------

    pub fn hover_play(&mut self) {
        if self.play_button_active() {
            self.cue(Cue::Hover);
        }
    }

    pub fn open_snake(&mut self) -> bool {
        if !self.play_button_active() {
            return false;
        }
        self.cue(Cue::Click);
        self.seed = self.seed.wrapping_add(1);
        self.snake = Some(SnakeGame::new(self.seed));
        true
    }

    pub fn start_snake(&mut self) -> bool {
        let Some(game) = self.snake.as_mut() else {
            return false;
        };
        game.start();
        self.cue(Cue::Success);
        true
    }

    pub fn steer_snake(&mut self, dir: Direction) -> bool {
        let turned = self.snake.as_mut().map(|g| g.steer(dir)).unwrap_or(false);
        if turned {
            self.cue(Cue::SnakeMove);
        }
        turned
    }

    pub fn close_snake(&mut self) {
        self.snake = None;
    }

    fn complete_snake(&mut self) {
        log::info!("[snake] completed");
        self.cue(Cue::SnakeWin);
        self.game_completed = true;
        self.snake = None;
        self.overlays.dismiss_kind(OverlayKind::Guidance, self.now_ms);
        self.menu.open(self.now_ms);
    }

    // ---------------- menu ----------------

    pub fn menu_key(&mut self, key: MenuKey) -> MenuOutcome {
        let outcome = self.menu.key(key);
        if let Some(cue) = outcome.cue {
            self.cue(cue);
        }
        if outcome.close {
            self.close_menu();
        }
        outcome
    }

    pub fn menu_choose(&mut self, index: usize) {
        if let Some(cue) = self.menu.choose(index).cue {
            self.cue(cue);
        }
    }

    pub fn menu_back(&mut self) {
        self.menu.back();
    }

    /// Leaving the menu restarts the journey from the top.
    pub fn close_menu(&mut self) {
        if !self.menu.is_open() {
            return;
        }
        self.menu.close(self.now_ms);
        self.game_completed = false;
        self.overlays.clear_all();
        self.wheel.reset();
        self.scroll.reset();
        if self.stages.reset() {
            log::info!("[stage] reset to {}", self.stages.stage());
        }
    }

    // ---------------- keyboard ----------------

    /// Routes one key press. Returns true when the key was consumed.
    pub fn on_key(&mut self, key: &str) -> bool {
        if self.menu.is_open() {
            return match MenuKey::from_key(key) {
                Some(k) => {
                    self.menu_key(k);
                    true
                }
                None => false,
            };
        }
        if let Some(started) = self.snake.as_ref().map(SnakeGame::started) {
            if let Some(dir) = Direction::from_key(key) {
                self.steer_snake(dir);
                return true;
            }
            match key {
                "Escape" => {
                    self.close_snake();
                    return true;
                }
                "Enter" | " " if !started => {
                    self.start_snake();
                    return true;
                }
                _ => {}
            }
        }
        if key.eq_ignore_ascii_case("m") {
            self.toggle_mute();
            return true;
        }
        false
    }

    pub fn toggle_mute(&mut self) {
        self.outbox.push(AudioRequest::ToggleMute);
    }

    fn modal_open(&self) -> bool {
        self.snake.is_some() || self.menu.is_open()
    }

    fn cue(&mut self, cue: Cue) {
        self.outbox.push(AudioRequest::Play(cue));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_play_stage(s: &mut Studio) -> f64 {
        let mut now = 0.0;
        for _ in 0..3 {
            s.on_wheel(250.0, now);
            // wait out both the cooldown and the read lock
            now += 4000.0;
            s.tick(now);
        }
        now
    }

    #[test]
    fn play_button_needs_guidance() {
        let mut s = Studio::new(ScrollConfig::default(), 7);
        assert!(!s.open_snake());
        let now = to_play_stage(&mut s);
        assert_eq!(s.stage(), Stage::PLAY);
        s.tick(now + 1000.0);
        assert!(s.play_button_active());
        assert!(s.open_snake());
        assert!(!s.play_button_active());
    }

    #[test]
    fn wheel_is_ignored_while_snake_is_open() {
        let mut s = Studio::new(ScrollConfig::default(), 7);
        let now = to_play_stage(&mut s) + 1000.0;
        s.tick(now);
        s.open_snake();
        assert_eq!(s.on_wheel(-500.0, now + 5000.0), None);
        assert_eq!(s.stage(), Stage::PLAY);
    }
}

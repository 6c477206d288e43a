//! Wheel/touch input normalization into single stage steps.
//!
//! Decay is computed from event timestamps only: before a delta is added the
//! accumulator is scaled by `decay_factor` once for every whole
//! `decay_interval_ms` elapsed since the last decay point. After a committed
//! step the accumulator is zeroed and every event inside the cooldown window
//! is discarded, so one window can never yield two steps.

use crate::config::{ScrollThresholds, WheelConfig};
use crate::stage::{Stage, StageStep};

// Past this many periods the accumulator is effectively zero.
const MAX_DECAY_PERIODS: f64 = 64.0;

#[derive(Clone, Debug)]
pub struct WheelNormalizer {
    cfg: WheelConfig,
    accumulator: f64,
    last_commit_ms: Option<f64>,
    decay_anchor_ms: Option<f64>,
}

impl WheelNormalizer {
    pub fn new(cfg: WheelConfig) -> Self {
        Self {
            cfg,
            accumulator: 0.0,
            last_commit_ms: None,
            decay_anchor_ms: None,
        }
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn in_cooldown(&self, now_ms: f64) -> bool {
        self.last_commit_ms
            .map(|t| now_ms - t < self.cfg.cooldown_ms)
            .unwrap_or(false)
    }

    /// Feed one wheel event. Returns the step to commit, if any.
    pub fn feed(
        &mut self,
        delta_y: f64,
        now_ms: f64,
        stage: Stage,
        locked: bool,
    ) -> Option<StageStep> {
        if locked || self.in_cooldown(now_ms) || !delta_y.is_finite() {
            return None;
        }
        self.decay_to(now_ms);
        self.accumulator += delta_y;

        let threshold = self.cfg.threshold;
        let step = if self.accumulator > threshold && stage.can_advance() {
            Some(StageStep::Forward)
        } else if self.accumulator < -threshold && stage.can_retreat() {
            Some(StageStep::Back)
        } else {
            None
        };
        if step.is_some() {
            self.commit(now_ms);
        }
        step
    }

    /// Gate for steps decided elsewhere (touch path). Commits on success.
    pub fn try_commit(&mut self, now_ms: f64, locked: bool) -> bool {
        if locked || self.in_cooldown(now_ms) {
            return false;
        }
        self.commit(now_ms);
        true
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.decay_anchor_ms = None;
    }

    fn commit(&mut self, now_ms: f64) {
        self.accumulator = 0.0;
        self.last_commit_ms = Some(now_ms);
        self.decay_anchor_ms = Some(now_ms);
    }

    fn decay_to(&mut self, now_ms: f64) {
        let anchor = match self.decay_anchor_ms {
            Some(a) => a,
            None => {
                self.decay_anchor_ms = Some(now_ms);
                return;
            }
        };
        let interval = self.cfg.decay_interval_ms;
        if interval <= 0.0 || now_ms <= anchor {
            return;
        }
        let periods = ((now_ms - anchor) / interval).floor();
        if periods < 1.0 {
            return;
        }
        if periods >= MAX_DECAY_PERIODS {
            self.accumulator = 0.0;
        } else {
            self.accumulator *= self.cfg.decay_factor.powi(periods as i32);
        }
        self.decay_anchor_ms = Some(anchor + periods * interval);
    }
}

/// Virtual scroll offset built from vertical touch drags.
#[derive(Clone, Debug, Default)]
pub struct ScrollPosition {
    offset: f64,
    last_y: Option<f64>,
}

impl ScrollPosition {
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn begin(&mut self, y: f64) {
        self.last_y = Some(y);
    }

    pub fn end(&mut self) {
        self.last_y = None;
    }

    /// Dragging the finger up scrolls forward. Returns the new offset.
    pub fn drag(&mut self, y: f64) -> f64 {
        if let Some(prev) = self.last_y {
            self.offset = (self.offset + (prev - y)).max(0.0);
        }
        self.last_y = Some(y);
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.last_y = None;
    }
}

/// At most one step toward where `offset` says the visitor should be.
pub fn step_for_offset(
    offset: f64,
    stage: Stage,
    thresholds: &ScrollThresholds,
) -> Option<StageStep> {
    if let Some(at) = thresholds.forward_at(stage.index()) {
        if offset >= at {
            return Some(StageStep::Forward);
        }
    }
    if offset < thresholds.intro_warning && stage.can_retreat() {
        return Some(StageStep::Back);
    }
    None
}

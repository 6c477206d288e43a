//! Narrative stage: Start → Warning → Intro → Play.
//!
//! The stage only ever moves one step at a time and is clamped at both ends.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stage(u8);

impl Stage {
    pub const START: Stage = Stage(0);
    pub const WARNING: Stage = Stage(1);
    pub const INTRO: Stage = Stage(2);
    pub const PLAY: Stage = Stage(3);
    pub const LAST: u8 = 3;
    pub const COUNT: usize = 4;

    /// Builds a stage, clamping out-of-range values to the last stage.
    pub fn new(value: u8) -> Self {
        Stage(value.min(Self::LAST))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn can_advance(self) -> bool {
        self.0 < Self::LAST
    }

    pub fn can_retreat(self) -> bool {
        self.0 > 0
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "Start",
            1 => "Warning",
            2 => "Intro",
            _ => "Play",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageStep {
    Forward,
    Back,
}

/// Owns the current stage. Every committed change moves exactly one step.
#[derive(Clone, Debug, Default)]
pub struct StageController {
    stage: Stage,
}

impl StageController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn advance(&mut self) -> bool {
        if self.stage.can_advance() {
            self.stage = Stage(self.stage.0 + 1);
            true
        } else {
            false
        }
    }

    pub fn retreat(&mut self) -> bool {
        if self.stage.can_retreat() {
            self.stage = Stage(self.stage.0 - 1);
            true
        } else {
            false
        }
    }

    pub fn apply(&mut self, step: StageStep) -> bool {
        match step {
            StageStep::Forward => self.advance(),
            StageStep::Back => self.retreat(),
        }
    }

    /// Jumps back to the start. Returns whether the stage changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.stage != Stage::START;
        self.stage = Stage::START;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_no_ops() {
        let mut c = StageController::new();
        assert!(!c.retreat());
        assert_eq!(c.stage(), Stage::START);
        for _ in 0..3 {
            assert!(c.advance());
        }
        assert!(!c.advance());
        assert_eq!(c.stage(), Stage::PLAY);
    }

    #[test]
    fn new_clamps() {
        assert_eq!(Stage::new(9), Stage::PLAY);
        assert_eq!(Stage::new(2).name(), "Intro");
    }
}

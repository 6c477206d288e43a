//! Overlay choreography driven by stage entries.
//!
//! Only one overlay is current at a time. Its presence follows the
//! `Hidden → Entering → Visible → Exiting → Hidden` table in
//! [`Presence::next`]; every delay is a [`TimerSlot`] that is replaced when
//! its trigger repeats and cleared when the stage returns to the start.

use crate::config::OverlayTimings;
use crate::stage::Stage;
use crate::timer::TimerSlot;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Warning,
    Intro,
    Guidance,
}

impl OverlayKind {
    /// Warning and intro close themselves; guidance stays until the host hides it.
    pub fn auto_hides(self) -> bool {
        matches!(self, OverlayKind::Warning | OverlayKind::Intro)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Presence {
    #[default]
    Hidden,
    Entering,
    Visible,
    Exiting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresenceEvent {
    Show,
    Settle,
    Dismiss,
    Finish,
}

impl Presence {
    pub fn next(self, ev: PresenceEvent) -> Presence {
        use Presence::*;
        use PresenceEvent::*;
        match (self, ev) {
            (Hidden, Show) | (Exiting, Show) => Entering,
            (Entering, Settle) => Visible,
            (Entering, Dismiss) | (Visible, Dismiss) => Exiting,
            (Exiting, Finish) => Hidden,
            (s, _) => s,
        }
    }

    pub fn is_shown(self) -> bool {
        matches!(self, Presence::Entering | Presence::Visible)
    }

    pub fn opacity(self) -> f32 {
        if self == Presence::Visible {
            1.0
        } else {
            0.0
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Presence::Hidden => "hidden",
            Presence::Entering => "entering",
            Presence::Visible => "visible",
            Presence::Exiting => "exiting",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayView {
    pub kind: OverlayKind,
    pub presence: Presence,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Phase,
    Reveal,
    AutoHide,
    Unlock,
}

#[derive(Clone, Debug)]
pub struct Choreographer {
    timings: OverlayTimings,
    current: Option<OverlayView>,
    pending: Option<OverlayKind>,
    phase: TimerSlot,
    reveal: TimerSlot,
    auto_hide: TimerSlot,
    unlock: TimerSlot,
    locked: bool,
}

impl Choreographer {
    pub fn new(timings: OverlayTimings) -> Self {
        Self {
            timings,
            current: None,
            pending: None,
            phase: TimerSlot::idle(),
            reveal: TimerSlot::idle(),
            auto_hide: TimerSlot::idle(),
            unlock: TimerSlot::idle(),
            locked: false,
        }
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn current(&self) -> Option<OverlayView> {
        self.current
    }

    pub fn pending(&self) -> Option<OverlayKind> {
        self.pending
    }

    pub fn presence_of(&self, kind: OverlayKind) -> Presence {
        match self.current {
            Some(v) if v.kind == kind => v.presence,
            _ => Presence::Hidden,
        }
    }

    pub fn on_stage_entered(&mut self, stage: Stage, now_ms: f64) {
        let t = self.timings.clone();
        match stage.index() {
            0 => self.clear_all(),
            1 => {
                self.request(OverlayKind::Warning, now_ms, t.warning_delay_ms);
                self.lock_for(now_ms, t.warning_delay_ms + t.warning_read_ms);
            }
            2 => {
                self.request(OverlayKind::Intro, now_ms, t.overlay_delay_ms);
                self.lock_for(now_ms, t.overlay_delay_ms + t.intro_read_ms);
            }
            _ => {
                self.unlock.cancel();
                self.locked = false;
                self.request(OverlayKind::Guidance, now_ms, t.guidance_delay_ms);
            }
        }
    }

    /// Click/programmatic dismissal of the current overlay.
    /// Returns false (and does nothing) when nothing is shown.
    pub fn dismiss(&mut self, now_ms: f64) -> bool {
        match self.current {
            Some(v) if v.presence.is_shown() => {
                self.begin_exit(now_ms);
                true
            }
            _ => false,
        }
    }

    /// Hide `kind` if it is the current overlay or about to be revealed.
    pub fn dismiss_kind(&mut self, kind: OverlayKind, now_ms: f64) -> bool {
        if self.pending == Some(kind) {
            self.pending = None;
            self.reveal.cancel();
        }
        match self.current {
            Some(v) if v.kind == kind => self.dismiss(now_ms),
            _ => false,
        }
    }

    /// Immediate reset: nothing rendered, nothing pending, no lock.
    pub fn clear_all(&mut self) {
        self.current = None;
        self.pending = None;
        self.phase.cancel();
        self.reveal.cancel();
        self.auto_hide.cancel();
        self.unlock.cancel();
        self.locked = false;
    }

    /// Fire every due timer in deadline order. Returns the overlays that
    /// were revealed during this call.
    pub fn tick(&mut self, now_ms: f64) -> SmallVec<[OverlayKind; 2]> {
        let mut revealed = SmallVec::new();
        while let Some((slot, at)) = self.next_due(now_ms) {
            match slot {
                Slot::Phase => {
                    self.phase.cancel();
                    self.finish_phase(at);
                }
                Slot::Reveal => {
                    self.reveal.cancel();
                    if let Some(kind) = self.reveal_pending(at) {
                        revealed.push(kind);
                    }
                }
                Slot::AutoHide => {
                    self.auto_hide.cancel();
                    self.dismiss(at);
                }
                Slot::Unlock => {
                    self.unlock.cancel();
                    self.locked = false;
                }
            }
        }
        revealed
    }

    fn next_due(&self, now_ms: f64) -> Option<(Slot, f64)> {
        [
            (Slot::Phase, self.phase.deadline()),
            (Slot::Reveal, self.reveal.deadline()),
            (Slot::AutoHide, self.auto_hide.deadline()),
            (Slot::Unlock, self.unlock.deadline()),
        ]
        .into_iter()
        .filter_map(|(s, d)| d.filter(|&t| t <= now_ms).map(|t| (s, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn request(&mut self, kind: OverlayKind, now_ms: f64, delay_ms: f64) {
        if let Some(v) = self.current {
            if v.kind == kind && v.presence.is_shown() {
                // Already on screen; only drop a stale reveal for another kind.
                self.pending = None;
                self.reveal.cancel();
                return;
            }
            if v.kind != kind {
                self.dismiss(now_ms);
            }
        }
        self.pending = Some(kind);
        self.reveal.schedule(now_ms, delay_ms);
    }

    fn lock_for(&mut self, now_ms: f64, total_ms: f64) {
        self.locked = true;
        self.unlock.schedule(now_ms, total_ms);
    }

    fn begin_exit(&mut self, at_ms: f64) {
        if let Some(v) = self.current.as_mut() {
            v.presence = v.presence.next(PresenceEvent::Dismiss);
        }
        self.auto_hide.cancel();
        self.phase.schedule(at_ms, self.timings.transition_duration_ms);
    }

    fn finish_phase(&mut self, at_ms: f64) {
        let Some(mut v) = self.current else {
            return;
        };
        match v.presence {
            Presence::Entering => {
                v.presence = v.presence.next(PresenceEvent::Settle);
                self.current = Some(v);
            }
            Presence::Exiting => {
                self.current = None;
            }
            _ => {}
        }
        log::debug!("[overlay] phase settled at {:.0}ms: {:?}", at_ms, self.current);
    }

    fn reveal_pending(&mut self, at_ms: f64) -> Option<OverlayKind> {
        let kind = self.pending.take()?;
        let presence = match self.current {
            // Re-entering the overlay that is still fading out.
            Some(v) if v.kind == kind => v.presence.next(PresenceEvent::Show),
            // Anything else still on screen is dropped so only one renders.
            _ => Presence::Hidden.next(PresenceEvent::Show),
        };
        self.current = Some(OverlayView { kind, presence });
        self.phase.schedule(at_ms, self.timings.settle_ms);
        if kind.auto_hides() {
            self.auto_hide.schedule(at_ms, self.timings.auto_hide_delay_ms);
        } else {
            self.auto_hide.cancel();
        }
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_ignores_invalid_events() {
        assert_eq!(Presence::Hidden.next(PresenceEvent::Dismiss), Presence::Hidden);
        assert_eq!(Presence::Hidden.next(PresenceEvent::Settle), Presence::Hidden);
        assert_eq!(Presence::Visible.next(PresenceEvent::Show), Presence::Visible);
        assert_eq!(Presence::Exiting.next(PresenceEvent::Show), Presence::Entering);
    }

    #[test]
    fn stage_three_reveals_guidance_without_auto_hide() {
        let mut c = Choreographer::new(OverlayTimings::default());
        c.on_stage_entered(Stage::PLAY, 0.0);
        assert_eq!(c.tick(800.0).as_slice(), &[OverlayKind::Guidance]);
        c.tick(60_000.0);
        assert_eq!(c.presence_of(OverlayKind::Guidance), Presence::Visible);
    }
}

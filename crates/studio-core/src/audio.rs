//! Synthesized cue planning and the ambient chord bed.
//!
//! Nothing here touches an audio API. Cues are expanded into [`Tone`]
//! descriptions that the web front end turns into oscillator/gain pairs.
//! [`CueDispatcher`] owns the mute/volume state and the queue of cues that
//! arrive before the audio context is ready.

use crate::constants::{AMBIENT_PERIOD_MS, DEFAULT_MUSIC_VOLUME, DEFAULT_VOLUME};
use serde::Serialize;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Scroll,
    Hover,
    Click,
    MenuMove,
    MenuSelect,
    SnakeEat,
    SnakeWin,
    SnakeMove,
    Warning,
    Intro,
    Success,
}

impl Cue {
    pub const ALL: [Cue; 11] = [
        Cue::Scroll,
        Cue::Hover,
        Cue::Click,
        Cue::MenuMove,
        Cue::MenuSelect,
        Cue::SnakeEat,
        Cue::SnakeWin,
        Cue::SnakeMove,
        Cue::Warning,
        Cue::Intro,
        Cue::Success,
    ];
}

/// Gain shape over a tone's lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Envelope {
    /// Linear attack to `peak`, exponential fall to silence at the end.
    Pluck { attack_sec: f64 },
    /// Slow swell used by the ambient chords: peak at 0.5 s, half at 3.5 s.
    Swell,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub freq_hz: f32,
    /// Exponential glide target reached at `glide_sec`.
    pub glide_to_hz: Option<(f32, f64)>,
    pub start_sec: f64,
    pub duration_sec: f64,
    pub peak: f32,
    pub envelope: Envelope,
}

pub const SILENCE_GAIN: f32 = 0.001;

fn beep(freq_hz: f32, duration_sec: f64, waveform: Waveform, volume: f32) -> Tone {
    Tone {
        waveform,
        freq_hz,
        glide_to_hz: None,
        start_sec: 0.0,
        duration_sec,
        peak: volume * 0.3,
        envelope: Envelope::Pluck { attack_sec: 0.01 },
    }
}

fn arpeggio(
    notes: &[f32],
    spacing_sec: f64,
    duration_sec: f64,
    waveform: Waveform,
    peak: f32,
) -> SmallVec<[Tone; 4]> {
    notes
        .iter()
        .enumerate()
        .map(|(i, &f)| Tone {
            waveform,
            freq_hz: f,
            glide_to_hz: None,
            start_sec: i as f64 * spacing_sec,
            duration_sec,
            peak,
            envelope: Envelope::Pluck { attack_sec: 0.01 },
        })
        .collect()
}

/// Expand a cue into the tones that make it up.
pub fn cue_tones(cue: Cue, volume: f32) -> SmallVec<[Tone; 4]> {
    use Waveform::*;
    match cue {
        Cue::Scroll => smallvec![beep(220.0, 0.1, Sine, volume)],
        Cue::Hover => smallvec![beep(440.0, 0.05, Square, volume)],
        Cue::Click => smallvec![beep(880.0, 0.1, Triangle, volume)],
        Cue::MenuMove => smallvec![beep(330.0, 0.08, Sine, volume)],
        Cue::MenuSelect => smallvec![beep(660.0, 0.15, Square, volume)],
        Cue::SnakeEat => smallvec![beep(523.0, 0.2, Square, volume)],
        Cue::SnakeMove => smallvec![beep(110.0, 0.03, Sine, volume)],
        Cue::Warning => smallvec![Tone {
            waveform: Saw,
            freq_hz: 80.0,
            glide_to_hz: Some((60.0, 0.5)),
            start_sec: 0.0,
            duration_sec: 0.8,
            peak: volume * 0.4,
            envelope: Envelope::Pluck { attack_sec: 0.1 },
        }],
        // C E G C
        Cue::Intro => arpeggio(&[262.0, 330.0, 392.0, 523.0], 0.1, 0.3, Square, volume * 0.3),
        Cue::SnakeWin => arpeggio(
            &[523.0, 659.0, 784.0, 1047.0],
            0.15,
            0.4,
            Triangle,
            volume * 0.4,
        ),
        Cue::Success => smallvec![Tone {
            waveform: Sine,
            freq_hz: 440.0,
            glide_to_hz: Some((880.0, 0.2)),
            start_sec: 0.0,
            duration_sec: 0.3,
            peak: volume * 0.3,
            envelope: Envelope::Pluck { attack_sec: 0.01 },
        }],
    }
}

// Am, G, F, G
pub const AMBIENT_CHORDS: [[f32; 3]; 4] = [
    [220.0, 277.0, 330.0],
    [196.0, 247.0, 294.0],
    [175.0, 220.0, 262.0],
    [196.0, 247.0, 294.0],
];

pub fn chord_tones(index: usize, music_volume: f32) -> SmallVec<[Tone; 3]> {
    AMBIENT_CHORDS[index % AMBIENT_CHORDS.len()]
        .iter()
        .map(|&f| Tone {
            waveform: Waveform::Sine,
            freq_hz: f,
            glide_to_hz: None,
            start_sec: 0.0,
            duration_sec: AMBIENT_PERIOD_MS / 1000.0,
            peak: music_volume * 0.1,
            envelope: Envelope::Swell,
        })
        .collect()
}

/// Looping 4-chord background bed, polled from the frame loop.
#[derive(Clone, Debug, Default)]
pub struct AmbientBed {
    running: bool,
    next_ms: f64,
    index: usize,
}

impl AmbientBed {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn chord_index(&self) -> usize {
        self.index
    }

    /// Returns false if it was already running.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.next_ms = now_ms;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn poll(&mut self, now_ms: f64, music_volume: f32) -> Option<SmallVec<[Tone; 3]>> {
        if !self.running || now_ms < self.next_ms {
            return None;
        }
        let chord = chord_tones(self.index, music_volume);
        self.index = (self.index + 1) % AMBIENT_CHORDS.len();
        self.next_ms += AMBIENT_PERIOD_MS;
        if self.next_ms <= now_ms {
            // stalled (hidden tab): do not replay every missed chord
            self.next_ms = now_ms + AMBIENT_PERIOD_MS;
        }
        Some(chord)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AudioInit {
    #[default]
    Idle,
    Pending,
    Ready,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch {
    Play(SmallVec<[Tone; 4]>),
    /// Queued until init completes; `start_init` is set for the first one.
    Deferred { start_init: bool },
    Muted,
    Unavailable,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStatus {
    pub initialized: bool,
    pub muted: bool,
    pub volume: f32,
    pub music_volume: f32,
    pub background_music_playing: bool,
}

#[derive(Clone, Debug)]
pub struct CueDispatcher {
    init: AudioInit,
    queue: Vec<Cue>,
    muted: bool,
    volume: f32,
    music_volume: f32,
    music_wanted: bool,
    bed: AmbientBed,
}

impl Default for CueDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CueDispatcher {
    pub fn new() -> Self {
        Self {
            init: AudioInit::Idle,
            queue: Vec::new(),
            muted: false,
            volume: DEFAULT_VOLUME,
            music_volume: DEFAULT_MUSIC_VOLUME,
            music_wanted: false,
            bed: AmbientBed::default(),
        }
    }

    pub fn init_state(&self) -> AudioInit {
        self.init
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn queued(&self) -> &[Cue] {
        &self.queue
    }

    pub fn dispatch(&mut self, cue: Cue) -> Dispatch {
        match self.init {
            AudioInit::Ready => self.play_now(cue).map_or(Dispatch::Muted, Dispatch::Play),
            AudioInit::Idle => {
                self.init = AudioInit::Pending;
                self.queue.push(cue);
                Dispatch::Deferred { start_init: true }
            }
            AudioInit::Pending => {
                self.queue.push(cue);
                Dispatch::Deferred { start_init: false }
            }
            AudioInit::Failed => Dispatch::Unavailable,
        }
    }

    /// Tones for an immediate playback, or None when muted or not ready.
    pub fn play_now(&self, cue: Cue) -> Option<SmallVec<[Tone; 4]>> {
        (self.init == AudioInit::Ready && !self.muted).then(|| cue_tones(cue, self.volume))
    }

    /// Marks init as started. False if it already ran or is running.
    pub fn begin_init(&mut self) -> bool {
        if self.init == AudioInit::Idle {
            self.init = AudioInit::Pending;
            true
        } else {
            false
        }
    }

    /// Completes init and hands back each queued cue exactly once.
    pub fn finish_init(&mut self, ok: bool) -> Vec<Cue> {
        if self.init == AudioInit::Ready {
            return Vec::new();
        }
        if ok {
            self.init = AudioInit::Ready;
            std::mem::take(&mut self.queue)
        } else {
            self.init = AudioInit::Failed;
            self.queue.clear();
            Vec::new()
        }
    }

    pub fn start_music(&mut self, now_ms: f64) -> bool {
        if self.init != AudioInit::Ready {
            return false;
        }
        self.music_wanted = true;
        if self.muted {
            return false;
        }
        self.bed.start(now_ms)
    }

    pub fn poll_music(&mut self, now_ms: f64) -> Option<SmallVec<[Tone; 3]>> {
        if self.muted {
            return None;
        }
        self.bed.poll(now_ms, self.music_volume)
    }

    /// Returns the new mute state. The ambient bed stops while muted and
    /// resumes on unmute if music had been started.
    pub fn toggle_mute(&mut self, now_ms: f64) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.bed.stop();
        } else if self.init == AudioInit::Ready && self.music_wanted {
            self.bed.start(now_ms);
        }
        self.muted
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    pub fn stop_all(&mut self) {
        self.bed.stop();
        self.music_wanted = false;
    }

    pub fn music_wanted(&self) -> bool {
        self.music_wanted
    }

    pub fn status(&self) -> AudioStatus {
        AudioStatus {
            initialized: self.init == AudioInit::Ready,
            muted: self.muted,
            volume: self.volume,
            music_volume: self.music_volume,
            background_music_playing: self.bed.is_running(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cue_has_audible_tones() {
        for cue in Cue::ALL {
            let tones = cue_tones(cue, DEFAULT_VOLUME);
            assert!(!tones.is_empty(), "{cue:?}");
            assert!(tones.iter().all(|t| t.peak > SILENCE_GAIN && t.duration_sec > 0.0));
        }
    }

    #[test]
    fn bed_skips_missed_chords_after_stall() {
        let mut bed = AmbientBed::default();
        bed.start(0.0);
        assert!(bed.poll(0.0, 0.3).is_some());
        assert!(bed.poll(60_000.0, 0.3).is_some());
        assert!(bed.poll(60_001.0, 0.3).is_none());
    }
}

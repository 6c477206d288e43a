use crate::constants::AUDIO_LEAD_SEC;
use std::cell::RefCell;
use std::rc::Rc;
use studio_core::audio::{AudioInit, CueDispatcher, Dispatch, Envelope, Tone, Waveform, SILENCE_GAIN};
use studio_core::{AudioRequest, AudioStatus, Cue};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("[audio] {} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

fn oscillator_type(waveform: Waveform) -> web::OscillatorType {
    match waveform {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Square => web::OscillatorType::Square,
        Waveform::Saw => web::OscillatorType::Sawtooth,
        Waveform::Triangle => web::OscillatorType::Triangle,
    }
}

// One oscillator + gain envelope per tone, straight into the master gain
fn play_tone(audio_ctx: &web::AudioContext, master: &web::GainNode, tone: &Tone) {
    let Ok(src) = web::OscillatorNode::new(audio_ctx) else {
        return;
    };
    let Ok(g) = create_gain(audio_ctx, 0.0, "tone") else {
        return;
    };
    src.set_type(oscillator_type(tone.waveform));

    let t0 = audio_ctx.current_time() + AUDIO_LEAD_SEC + tone.start_sec;
    let end = t0 + tone.duration_sec;
    src.frequency().set_value_at_time(tone.freq_hz, t0).ok();
    if let Some((to_hz, glide_sec)) = tone.glide_to_hz {
        _ = src
            .frequency()
            .exponential_ramp_to_value_at_time(to_hz, t0 + glide_sec);
    }

    let gain = g.gain();
    _ = gain.set_value_at_time(0.0, t0);
    match tone.envelope {
        Envelope::Pluck { attack_sec } => {
            _ = gain.linear_ramp_to_value_at_time(tone.peak, t0 + attack_sec);
            _ = gain.exponential_ramp_to_value_at_time(SILENCE_GAIN, end);
        }
        Envelope::Swell => {
            _ = gain.linear_ramp_to_value_at_time(tone.peak, t0 + 0.5);
            _ = gain.linear_ramp_to_value_at_time(tone.peak * 0.5, t0 + 3.5);
            _ = gain.exponential_ramp_to_value_at_time(SILENCE_GAIN, end);
        }
    }

    _ = src.connect_with_audio_node(&g);
    _ = g.connect_with_audio_node(master);
    _ = src.start_with_when(t0);
    _ = src.stop_with_when(end + 0.02);
}

struct Graph {
    ctx: web::AudioContext,
    master: web::GainNode,
}

impl Graph {
    fn build() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let master = create_gain(&ctx, 1.0, "Master")
            .map_err(|_| anyhow::anyhow!("master gain unavailable"))?;
        _ = master.connect_with_audio_node(&ctx.destination());
        Ok(Self { ctx, master })
    }

    fn running(&self) -> bool {
        self.ctx.state() == web::AudioContextState::Running
    }
}

/// Process-wide audio service. Built once at startup; nothing is created on
/// the audio side until [`AudioService::init`] runs.
pub struct AudioService {
    dispatcher: CueDispatcher,
    graph: Option<Graph>,
    // ambient bed waits for a gesture while the context is suspended
    music_deferred: bool,
}

pub type SharedAudio = Rc<RefCell<AudioService>>;

impl AudioService {
    pub fn new() -> SharedAudio {
        Rc::new(RefCell::new(Self {
            dispatcher: CueDispatcher::new(),
            graph: None,
            music_deferred: false,
        }))
    }

    /// Builds the graph and resumes the context. Queued cues play once when
    /// it succeeds; on failure the page stays silent.
    pub fn init(this: &SharedAudio) {
        if !this.borrow_mut().dispatcher.begin_init() {
            return;
        }
        Self::spawn_init(this.clone());
    }

    fn spawn_init(this: SharedAudio) {
        let resume = match Self::install_graph(&this) {
            Some(p) => p,
            None => return,
        };
        // autoplay policy may leave this pending until a gesture resumes it
        spawn_local(async move {
            if wasm_bindgen_futures::JsFuture::from(resume).await.is_err() {
                log::warn!("[audio] resume rejected");
                return;
            }
            let mut svc = this.borrow_mut();
            if svc.music_deferred && svc.graph.as_ref().is_some_and(Graph::running) {
                svc.music_deferred = false;
                svc.start_music();
            }
        });
    }

    /// Stores the graph and completes init before the context is running, so
    /// gestures can resume it. Returns the pending resume promise.
    fn install_graph(this: &SharedAudio) -> Option<js_sys::Promise> {
        let mut svc = this.borrow_mut();
        let graph = match Graph::build() {
            Ok(g) => g,
            Err(e) => {
                log::warn!("[audio] init failed: {:?}", e);
                svc.dispatcher.finish_init(false);
                return None;
            }
        };
        let resume = graph.ctx.resume().ok();
        let running = graph.running();
        svc.graph = Some(graph);
        let queued = svc.dispatcher.finish_init(true);
        log::info!("[audio] initialized ({} queued cue(s))", queued.len());
        for cue in queued {
            svc.play_cue(cue);
        }
        if running {
            svc.start_music();
        } else {
            log::info!("[audio] context suspended; music waits for a gesture");
            svc.music_deferred = true;
        }
        resume
    }

    pub fn handle(this: &SharedAudio, req: AudioRequest) {
        match req {
            AudioRequest::Play(cue) => Self::dispatch(this, cue),
            AudioRequest::ToggleMute => {
                this.borrow_mut().toggle_mute();
            }
        }
    }

    pub fn dispatch(this: &SharedAudio, cue: Cue) {
        let outcome = this.borrow_mut().dispatcher.dispatch(cue);
        match outcome {
            Dispatch::Play(tones) => this.borrow().play_tones(&tones),
            Dispatch::Deferred { start_init: true } => Self::spawn_init(this.clone()),
            Dispatch::Deferred { .. } | Dispatch::Muted | Dispatch::Unavailable => {}
        }
    }

    /// Called from click/keydown handlers: resumes a suspended context and
    /// starts the deferred ambient bed.
    pub fn on_gesture(this: &SharedAudio) {
        let state = this.borrow().dispatcher.init_state();
        if state == AudioInit::Idle {
            Self::init(this);
            return;
        }
        let mut svc = this.borrow_mut();
        if let Some(g) = &svc.graph {
            if !g.running() {
                _ = g.ctx.resume();
            }
        }
        if svc.music_deferred {
            svc.music_deferred = false;
            svc.start_music();
        }
    }

    /// Polls the ambient bed; called every frame.
    pub fn tick(&mut self, now_ms: f64) {
        if let Some(chord) = self.dispatcher.poll_music(now_ms) {
            for tone in chord.iter() {
                self.play_tone(tone);
            }
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.dispatcher.toggle_mute(crate::dom::now_ms());
        log::info!("[audio] muted={}", muted);
        if let Some(doc) = crate::dom::window_document() {
            crate::overlay::set_mute_label(&doc, muted);
        }
        muted
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.dispatcher.set_volume(volume);
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.dispatcher.set_music_volume(volume);
    }

    pub fn status(&self) -> AudioStatus {
        self.dispatcher.status()
    }

    /// Stops the bed and closes the context.
    pub fn shutdown(&mut self) {
        self.dispatcher.stop_all();
        self.music_deferred = false;
        if let Some(g) = self.graph.take() {
            _ = g.ctx.close();
        }
        log::info!("[audio] shut down");
    }

    fn start_music(&mut self) {
        if self.dispatcher.start_music(crate::dom::now_ms()) {
            log::info!("[audio] ambient bed started");
        }
    }

    fn play_cue(&self, cue: Cue) {
        if let Some(tones) = self.dispatcher.play_now(cue) {
            self.play_tones(&tones);
        }
    }

    fn play_tones(&self, tones: &[Tone]) {
        for t in tones {
            self.play_tone(t);
        }
    }

    fn play_tone(&self, tone: &Tone) {
        if let Some(g) = &self.graph {
            play_tone(&g.ctx, &g.master, tone);
        }
    }
}

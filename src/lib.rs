#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use studio_core::decor::Decor;
use studio_core::scene::{edge_lines, prepare_room, studio_light_rig, studio_room};
use studio_core::{ScrollConfig, Studio, RAIN_DROP_COUNT};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod canvas2d;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use audio::{AudioService, SharedAudio};
use constants::*;

thread_local! {
    // exposed to page scripts through the exported volume/status functions
    static AUDIO: RefCell<Option<SharedAudio>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("studio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Master cue volume, clamped to `[0, 1]`.
#[wasm_bindgen]
pub fn set_volume(volume: f32) {
    AUDIO.with(|a| {
        if let Some(audio) = a.borrow().as_ref() {
            audio.borrow_mut().set_volume(volume);
        }
    });
}

#[wasm_bindgen]
pub fn set_music_volume(volume: f32) {
    AUDIO.with(|a| {
        if let Some(audio) = a.borrow().as_ref() {
            audio.borrow_mut().set_music_volume(volume);
        }
    });
}

/// Audio status as a JSON string for page diagnostics.
#[wasm_bindgen]
pub fn audio_status() -> String {
    AUDIO.with(|a| {
        a.borrow()
            .as_ref()
            .and_then(|audio| serde_json::to_string(&audio.borrow().status()).ok())
            .unwrap_or_else(|| "null".to_string())
    })
}

fn initial_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64 ^ (dom::now_ms() as u64).rotate_left(32)
}

fn wire_unload(audio: SharedAudio) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move || {
        audio.borrow_mut().shutdown();
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
    closure.forget();
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let studio_canvas = dom::canvas_by_id(&document, STUDIO_CANVAS_ID)?;
    // 2D layers are optional; the studio still works without them
    let decor_surface = dom::canvas_by_id(&document, DECOR_CANVAS_ID)
        .ok()
        .and_then(frame::Surface2d::new);
    let snake_surface = dom::canvas_by_id(&document, SNAKE_CANVAS_ID)
        .ok()
        .and_then(frame::Surface2d::new);

    let config = match dom::read_config_script(&document, CONFIG_SCRIPT_ID) {
        Some(json) => ScrollConfig::from_json(&json),
        None => ScrollConfig::default(),
    };
    overlay::apply_messages(&document, &config.messages);

    let seed = initial_seed();
    let now_ms = dom::now_ms();
    let studio = Rc::new(RefCell::new(Studio::new(config, seed)));
    let decor = Rc::new(RefCell::new(Decor::new(seed.wrapping_add(7), now_ms)));
    let audio = AudioService::new();
    AUDIO.with(|a| *a.borrow_mut() = Some(audio.clone()));
    AudioService::init(&audio);
    overlay::set_mute_label(&document, false);

    let mut canvases = vec![studio_canvas.clone()];
    canvases.extend(decor_surface.as_ref().map(|s| s.canvas.clone()));
    canvases.extend(snake_surface.as_ref().map(|s| s.canvas.clone()));
    dom::wire_canvas_resize(canvases);

    let room = edge_lines(&prepare_room(studio_room()), &studio_light_rig());
    log::info!("[scene] room prepared ({} line vertices)", room.len());
    let gpu = frame::init_gpu(&studio_canvas, &room, (RAIN_DROP_COUNT * 2) as u32).await;

    let wiring = events::InputWiring {
        document: document.clone(),
        studio: studio.clone(),
        audio: audio.clone(),
        decor: decor.clone(),
    };
    events::wire_input_handlers(wiring.clone());
    events::wire_global_keydown(wiring);
    wire_unload(audio.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        document,
        studio,
        audio,
        decor,
        studio_canvas,
        decor_surface,
        snake_surface,
        gpu,
        last_instant: Instant::now(),
        menu_signature: None,
        rain_scratch: Vec::with_capacity(RAIN_DROP_COUNT * 2),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

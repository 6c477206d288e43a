use super::InputWiring;
use crate::audio::AudioService;
use crate::input::is_navigation_key;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, w: &InputWiring) {
    if ev.repeat() && !is_navigation_key(&ev.key()) {
        return;
    }
    AudioService::on_gesture(&w.audio);

    let key = ev.key();
    let (consumed, modal) = {
        let mut studio = w.studio.borrow_mut();
        let consumed = studio.on_key(&key);
        (consumed, studio.snake().is_some() || studio.menu().is_open())
    };
    if consumed || (modal && is_navigation_key(&key)) {
        ev.prevent_default();
    }
    if consumed {
        log::debug!("[keys] {}", key);
    }
}

pub fn wire_global_keydown(w: InputWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &w);
    }) as Box<dyn FnMut(web::KeyboardEvent)>);
    _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

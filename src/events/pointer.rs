use crate::audio::{AudioService, SharedAudio};
use crate::constants::*;
use crate::dom;
use crate::input;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use studio_core::decor::Decor;
use studio_core::Studio;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub document: web::Document,
    pub studio: Rc<RefCell<Studio>>,
    pub audio: SharedAudio,
    pub decor: Rc<RefCell<Decor>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_wheel(&w);
    wire_touch(&w);
    wire_pointer(&w);
    wire_overlay_clicks(&w);
    wire_snake_controls(&w);
    wire_menu_clicks(&w);
}

fn add_window_listener<E: JsCast + 'static>(
    event: &str,
    passive: Option<bool>,
    handler: impl FnMut(E) + 'static,
) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    match passive {
        Some(p) => {
            let opts = web::AddEventListenerOptions::new();
            opts.set_passive(p);
            _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &opts,
            );
        }
        None => {
            _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    add_window_listener("wheel", Some(false), move |ev: web::WheelEvent| {
        // the page itself never scrolls; stages replace it
        ev.prevent_default();
        let viewport_h = web::window()
            .and_then(|win| win.inner_height().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let delta = input::wheel_delta_px(ev.delta_y(), ev.delta_mode(), viewport_h);
        w.decor.borrow_mut().hint.on_wheel();
        w.studio.borrow_mut().on_wheel(delta, dom::now_ms());
    });
}

fn first_touch_y(ev: &web::TouchEvent) -> Option<f64> {
    ev.touches().get(0).map(|t| t.client_y() as f64)
}

fn wire_touch(w: &InputWiring) {
    let ws = w.clone();
    add_window_listener("touchstart", Some(true), move |ev: web::TouchEvent| {
        if let Some(y) = first_touch_y(&ev) {
            ws.studio.borrow_mut().on_touch_start(y);
        }
        AudioService::on_gesture(&ws.audio);
    });

    let wm = w.clone();
    add_window_listener("touchmove", Some(false), move |ev: web::TouchEvent| {
        let Some(y) = first_touch_y(&ev) else {
            return;
        };
        ev.prevent_default();
        wm.decor.borrow_mut().hint.on_wheel();
        wm.studio.borrow_mut().on_touch_drag(y, dom::now_ms());
    });

    let we = w.clone();
    add_window_listener("touchend", Some(true), move |_: web::TouchEvent| {
        we.studio.borrow_mut().on_touch_end();
    });
}

fn wire_pointer(w: &InputWiring) {
    let wm = w.clone();
    add_window_listener("pointermove", None, move |ev: web::PointerEvent| {
        let pos = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        wm.decor.borrow_mut().trail.on_move(pos);
    });

    let wd = w.clone();
    add_window_listener("pointerdown", None, move |_: web::PointerEvent| {
        wd.decor.borrow_mut().trail.set_pressed(true);
        AudioService::on_gesture(&wd.audio);
    });

    let wu = w.clone();
    add_window_listener("pointerup", None, move |_: web::PointerEvent| {
        wu.decor.borrow_mut().trail.set_pressed(false);
    });
}

fn wire_overlay_clicks(w: &InputWiring) {
    for id in [WARNING_OVERLAY_ID, INTRO_OVERLAY_ID] {
        let studio = w.studio.clone();
        dom::add_click_listener(&w.document, id, move || {
            studio.borrow_mut().dismiss_overlay(dom::now_ms());
        });
    }

    let studio = w.studio.clone();
    dom::add_click_listener(&w.document, PLAY_BUTTON_ID, move || {
        studio.borrow_mut().open_snake();
    });
    let studio = w.studio.clone();
    dom::add_hover_listener(&w.document, PLAY_BUTTON_ID, move || {
        studio.borrow_mut().hover_play();
    });

    let studio = w.studio.clone();
    dom::add_click_listener(&w.document, MUTE_TOGGLE_ID, move || {
        studio.borrow_mut().toggle_mute();
    });
}

fn wire_snake_controls(w: &InputWiring) {
    let studio = w.studio.clone();
    dom::add_click_listener(&w.document, SNAKE_START_ID, move || {
        studio.borrow_mut().start_snake();
    });
    let studio = w.studio.clone();
    dom::add_click_listener(&w.document, SNAKE_CLOSE_ID, move || {
        studio.borrow_mut().close_snake();
    });
}

// Menu markup is re-rendered, so clicks are delegated from the container.
fn wire_menu_clicks(w: &InputWiring) {
    let Some(menu_el) = w.document.get_element_by_id(RETRO_MENU_ID) else {
        log::warn!("[dom] missing #{}; menu clicks not wired", RETRO_MENU_ID);
        return;
    };
    let studio = w.studio.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let Some(target) = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
        else {
            return;
        };
        let mut studio = studio.borrow_mut();
        match target.id().as_str() {
            MENU_BACK_ID => studio.menu_back(),
            MENU_CLOSE_ID => studio.close_menu(),
            _ => {
                let item = target
                    .closest("[data-id]")
                    .ok()
                    .flatten()
                    .and_then(|el| el.get_attribute("data-id"));
                if let Some(id) = item {
                    if let Some(i) = studio_core::menu::MENU_ITEMS.iter().position(|m| m.id == id) {
                        studio.menu_choose(i);
                    }
                }
            }
        }
    }) as Box<dyn FnMut(web::MouseEvent)>);
    _ = menu_el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

use crate::constants::*;
use crate::input::{overlay_element_id, presence_class};
use studio_core::menu::{RetroMenu, MENU_ITEMS};
use studio_core::overlay::{OverlayKind, Presence};
use studio_core::{OverlayMessages, Studio};
use web_sys as web;

const PRESENCE_CLASSES: [&str; 4] = [CLASS_HIDDEN, CLASS_ENTERING, CLASS_VISIBLE, CLASS_EXITING];

#[inline]
fn set_presence(document: &web::Document, id: &str, presence: Presence) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        let want = presence_class(presence);
        if cl.contains(want) {
            return;
        }
        for c in PRESENCE_CLASSES {
            _ = cl.remove_1(c);
        }
        _ = cl.add_1(want);
        // fallback for pages without the stylesheet
        let style = if presence == Presence::Hidden {
            "display:none".to_string()
        } else {
            format!("opacity:{}", presence.opacity())
        };
        _ = el.set_attribute("style", &style);
    }
}

#[inline]
fn set_shown(document: &web::Document, id: &str, shown: bool) {
    set_presence(
        document,
        id,
        if shown {
            Presence::Visible
        } else {
            Presence::Hidden
        },
    );
}

/// Fills the overlay copy from the configured messages.
pub fn apply_messages(document: &web::Document, messages: &OverlayMessages) {
    crate::dom::set_text(document, WARNING_OVERLAY_ID, &messages.warning);
    if let Some(el) = document.get_element_by_id(INTRO_OVERLAY_ID) {
        el.set_inner_html(&format!(
            "<h2>{}</h2><p>{}</p>",
            html_escape(&messages.intro_title),
            html_escape(&messages.introduction)
        ));
    }
    crate::dom::set_text(document, GUIDANCE_OVERLAY_ID, &messages.monitor_guidance);
}

/// Mirrors the studio's overlay/modal state onto the DOM.
pub fn sync(document: &web::Document, studio: &Studio, hint_visible: bool) {
    for kind in [OverlayKind::Warning, OverlayKind::Intro, OverlayKind::Guidance] {
        set_presence(document, overlay_element_id(kind), studio.overlay_presence(kind));
    }
    set_shown(document, PLAY_BUTTON_ID, studio.play_button_active());
    set_shown(document, SNAKE_MODAL_ID, studio.snake().is_some());
    if let Some(game) = studio.snake() {
        set_shown(document, SNAKE_START_ID, !game.started());
    }
    set_presence(document, RETRO_MENU_ID, studio.menu().presence());
    set_shown(document, SCROLL_HINT_ID, hint_visible);
}

pub fn render_menu(document: &web::Document, menu: &RetroMenu) {
    let Some(el) = document.get_element_by_id(RETRO_MENU_ID) else {
        return;
    };
    let body = if menu.showing_details() {
        let item = menu.selected_item();
        let details: String = item
            .details
            .iter()
            .map(|d| format!("<li>{}</li>", html_escape(d)))
            .collect();
        format!(
            "<h1>{}</h1><p>{}</p><ul>{}</ul><button id=\"{}\">← BACK TO MENU</button>",
            html_escape(item.title),
            html_escape(item.description),
            details,
            MENU_BACK_ID
        )
    } else {
        let items: String = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let class = if i == menu.selected() { "item selected" } else { "item" };
                format!("<div class=\"{}\" data-id=\"{}\">{}</div>", class, item.id, item.label)
            })
            .collect();
        format!(
            "<h1>⚡ MAIN MENU ⚡</h1><p>🎉 CONGRATULATIONS! SNAKE COMPLETED! 🎉</p>\
             <p class=\"hint\">Use ↑↓ arrows to navigate • ENTER to select • ESC to exit</p>{}",
            items
        )
    };
    el.set_inner_html(&format!(
        "<button id=\"{}\" class=\"close\">✕</button>{}",
        MENU_CLOSE_ID, body
    ));
}

pub fn set_mute_label(document: &web::Document, muted: bool) {
    crate::dom::set_text(document, MUTE_TOGGLE_ID, if muted { "🔇" } else { "🔊" });
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

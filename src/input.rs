use crate::constants::*;
use glam::IVec2;
use studio_core::overlay::{OverlayKind, Presence};
use studio_core::SNAKE_GRID_SIZE;

/// Converts a wheel `deltaY` into pixels whatever the event's `deltaMode`.
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32, viewport_height: f64) -> f64 {
    match delta_mode {
        1 => delta_y * WHEEL_LINE_PX,
        2 => {
            let page = if viewport_height > 0.0 {
                viewport_height
            } else {
                WHEEL_PAGE_FALLBACK_PX
            };
            delta_y * page
        }
        _ => delta_y,
    }
}

pub fn overlay_element_id(kind: OverlayKind) -> &'static str {
    match kind {
        OverlayKind::Warning => WARNING_OVERLAY_ID,
        OverlayKind::Intro => INTRO_OVERLAY_ID,
        OverlayKind::Guidance => GUIDANCE_OVERLAY_ID,
    }
}

pub fn presence_class(presence: Presence) -> &'static str {
    match presence {
        Presence::Hidden => CLASS_HIDDEN,
        Presence::Entering => CLASS_ENTERING,
        Presence::Visible => CLASS_VISIBLE,
        Presence::Exiting => CLASS_EXITING,
    }
}

/// Pixel rectangle `[x, y, w, h]` of a grid cell, inset by one pixel so the
/// grid lines stay visible.
pub fn snake_cell_rect(cell: IVec2, board_px: f64) -> [f64; 4] {
    let size = board_px / SNAKE_GRID_SIZE as f64;
    [
        cell.x as f64 * size + 1.0,
        cell.y as f64 * size + 1.0,
        size - 2.0,
        size - 2.0,
    ]
}

/// Keys the page must not act on itself (scrolling) while a modal owns them.
pub fn is_navigation_key(key: &str) -> bool {
    matches!(key, "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | " ")
}

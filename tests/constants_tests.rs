// Host-side tests for web constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use studio_core::{
    AMBIENT_PERIOD_MS, CAMERA_MAX_FRAME_SEC, CAMERA_SPRING_SUBSTEP_SEC, MENU_EXIT_MS,
    MENU_SETTLE_MS, SNAKE_COMPLETE_DELAY_MS, SNAKE_GRID_SIZE, SNAKE_START_CELL, SNAKE_TICK_MS,
};

#[test]
fn dom_ids_are_unique_and_non_empty() {
    let ids = [
        STUDIO_CANVAS_ID,
        DECOR_CANVAS_ID,
        SNAKE_CANVAS_ID,
        WARNING_OVERLAY_ID,
        INTRO_OVERLAY_ID,
        GUIDANCE_OVERLAY_ID,
        PLAY_BUTTON_ID,
        SNAKE_MODAL_ID,
        SNAKE_START_ID,
        SNAKE_CLOSE_ID,
        RETRO_MENU_ID,
        MENU_BACK_ID,
        MENU_CLOSE_ID,
        SCROLL_HINT_ID,
        MUTE_TOGGLE_ID,
        CONFIG_SCRIPT_ID,
    ];
    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert!(ids.iter().all(|id| !id.is_empty() && !id.contains(' ')));
}

#[test]
fn presence_classes_are_distinct() {
    let classes = [CLASS_HIDDEN, CLASS_ENTERING, CLASS_VISIBLE, CLASS_EXITING];
    let unique: std::collections::HashSet<_> = classes.iter().collect();
    assert_eq!(unique.len(), 4);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_constants_are_consistent() {
    assert!(SNAKE_TICK_MS > 0.0);
    assert!(SNAKE_COMPLETE_DELAY_MS > SNAKE_TICK_MS);
    assert!(MENU_SETTLE_MS < MENU_EXIT_MS);
    assert!(AMBIENT_PERIOD_MS > 0.0);
    // the spring must take several sub-steps inside the longest frame
    assert!(CAMERA_SPRING_SUBSTEP_SEC * 4.0 < CAMERA_MAX_FRAME_SEC);
    assert!(AUDIO_LEAD_SEC >= 0.0 && AUDIO_LEAD_SEC < 0.05);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn snake_board_fits_the_grid() {
    let (x, y) = SNAKE_START_CELL;
    assert!((0..SNAKE_GRID_SIZE).contains(&x));
    assert!((0..SNAKE_GRID_SIZE).contains(&y));
    // whole-pixel cells keep the grid lines crisp
    assert_eq!(SNAKE_BOARD_PX % SNAKE_GRID_SIZE as f64, 0.0);
}

#[test]
fn clear_colour_is_dark_and_normalized() {
    for c in CLEAR_RGB {
        assert!((0.0..=0.1).contains(&c));
    }
}

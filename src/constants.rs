// DOM hooks and presentation tuning for the web front end.
//
// Element ids are the contract with the host page; everything else keeps
// magic numbers out of the drawing code.

// Canvases
pub const STUDIO_CANVAS_ID: &str = "studio-canvas";
pub const DECOR_CANVAS_ID: &str = "decor-canvas";
pub const SNAKE_CANVAS_ID: &str = "snake-canvas";

// Overlays and controls
pub const WARNING_OVERLAY_ID: &str = "warning-overlay";
pub const INTRO_OVERLAY_ID: &str = "intro-overlay";
pub const GUIDANCE_OVERLAY_ID: &str = "guidance-overlay";
pub const PLAY_BUTTON_ID: &str = "play-button";
pub const SNAKE_MODAL_ID: &str = "snake-modal";
pub const SNAKE_START_ID: &str = "snake-start";
pub const SNAKE_CLOSE_ID: &str = "snake-close";
pub const RETRO_MENU_ID: &str = "retro-menu";
pub const MENU_BACK_ID: &str = "menu-back";
pub const MENU_CLOSE_ID: &str = "menu-close";
pub const SCROLL_HINT_ID: &str = "scroll-hint";
pub const MUTE_TOGGLE_ID: &str = "mute-toggle";

// Optional JSON overrides embedded by the page
pub const CONFIG_SCRIPT_ID: &str = "studio-config";

// Presence classes toggled on overlays; CSS owns the actual fades
pub const CLASS_HIDDEN: &str = "hidden";
pub const CLASS_ENTERING: &str = "entering";
pub const CLASS_VISIBLE: &str = "visible";
pub const CLASS_EXITING: &str = "exiting";

// Wheel deltaMode scaling (DOM_DELTA_LINE / DOM_DELTA_PAGE to pixels)
pub const WHEEL_LINE_PX: f64 = 16.0;
pub const WHEEL_PAGE_FALLBACK_PX: f64 = 800.0;

// Scene clear colour (night-time studio)
pub const CLEAR_RGB: [f64; 3] = [0.01, 0.012, 0.02];

// Snake board drawing
pub const SNAKE_BOARD_PX: f64 = 400.0;
pub const SNAKE_GRID_STROKE: &str = "#333";
pub const SNAKE_HEAD_FILL: &str = "#0f0";
pub const SNAKE_BODY_FILL: &str = "#0a0";
pub const SNAKE_FOOD_FILL: &str = "#f00";

// Decor drawing
pub const MATRIX_GREEN: &str = "#00ff41";
pub const TRAIL_DOT_PX: f64 = 8.0;
pub const PARTICLE_FONT: &str = "12px monospace";
pub const CURSOR_RADIUS_PX: f64 = 8.0;

// Audio scheduling lead so the first ramp is never in the past
pub const AUDIO_LEAD_SEC: f64 = 0.005;

// Shared tuning constants for the studio scene, its camera and the mini-game.

// Render surface
pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const TONE_MAPPING_EXPOSURE: f32 = 0.3; // slightly darker for drama

// Camera spring (mass/tension/friction as in a react-spring style config)
pub const CAMERA_SPRING_MASS: f32 = 2.0;
pub const CAMERA_SPRING_TENSION: f32 = 120.0;
pub const CAMERA_SPRING_FRICTION: f32 = 40.0;
pub const CAMERA_SPRING_SUBSTEP_SEC: f32 = 1.0 / 240.0;
pub const CAMERA_MAX_FRAME_SEC: f32 = 0.25; // clamp long stalls (tab switch)

// Room transform applied once after the scene asset is built
pub const ROOM_SCALE: f32 = 0.015;
pub const ROOM_OFFSET_Y: f32 = 1.0; // puts the scaled floor at y = 0

// Snake
pub const SNAKE_GRID_SIZE: i32 = 20;
pub const SNAKE_TICK_MS: f64 = 150.0;
pub const SNAKE_COMPLETE_DELAY_MS: f64 = 1000.0;
pub const SNAKE_START_CELL: (i32, i32) = (10, 10);

// Menu presence timings
pub const MENU_SETTLE_MS: f64 = 100.0;
pub const MENU_EXIT_MS: f64 = 300.0;

// Audio
pub const DEFAULT_VOLUME: f32 = 0.7;
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.3;
pub const AMBIENT_PERIOD_MS: f64 = 4000.0;

// Decorations
pub const RAIN_DROP_COUNT: usize = 800;
pub const TRAIL_MAX_POINTS: usize = 6;
pub const TRAIL_MAX_PARTICLES: usize = 9;
pub const TRAIL_STEP_MS: f64 = 32.0;
pub const CORNER_REGEN_MS: f64 = 10_000.0;
pub const SCROLL_HINT_MS: f64 = 5000.0;

pub mod audio;
pub mod camera;
pub mod config;
pub mod constants;
pub mod decor;
pub mod menu;
pub mod overlay;
pub mod scene;
pub mod snake;
pub mod stage;
pub mod studio;
pub mod timer;
pub mod wheel;

pub use audio::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use stage::*;
pub use studio::*;

pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");

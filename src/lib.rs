//! Gesture Flap - a side-scrolling flappy game driven by body gestures
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state)
//! - `detect`: Gesture event detection (arm-raise edges, finger counts)
//! - `renderer`: Software framebuffer drawing for the game and debug views
//! - `platform`: Native window and keyboard handling
//! - `settings`: JSON-backed configuration

pub mod detect;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::{ModelSettings, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;

    /// Play field dimensions
    pub const SCREEN_WIDTH: usize = 800;
    pub const SCREEN_HEIGHT: usize = 600;
    /// Height of the scrolling ground strip at the bottom of the screen
    pub const BASE_HEIGHT: f32 = 112.0;
    /// Bird dies once its centre drops below this line
    pub const FLOOR_Y: f32 = SCREEN_HEIGHT as f32 - BASE_HEIGHT;

    /// Bird defaults
    pub const BIRD_X: f32 = 150.0;
    pub const BIRD_START_Y: f32 = 300.0;
    pub const BIRD_WIDTH: f32 = 34.0;
    pub const BIRD_HEIGHT: f32 = 24.0;
    /// Vertical velocity set on every flap (negative is up)
    pub const FLAP_VELOCITY: f32 = -5.0;

    /// Pipe segment sprite size
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_HEIGHT: f32 = 320.0;
    /// A new pipe spawns once the newest one is this far from the right edge
    pub const PIPE_DISTANCE: f32 = 300.0;
    /// Inclusive range the gap centre is drawn from
    pub const GAP_CENTER_MIN: i32 = 100;
    pub const GAP_CENTER_MAX: i32 = 400;

    /// Points per speed step
    pub const SCORE_BAND: u32 = 5;

    /// Values restored on reset, before a difficulty is chosen
    pub const RESET_PIPE_SPEED: u32 = 3;
    pub const RESET_PIPE_GAP: u32 = 200;
    pub const RESET_GRAVITY_STEP: f32 = 0.2;
}

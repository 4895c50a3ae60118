//! Software rendering module
//!
//! Everything is drawn into a CPU-side ARGB [`Canvas`] that the platform layer
//! hands to the window each frame.

pub mod canvas;
pub mod debug;
pub mod font;
pub mod scene;

pub use canvas::Canvas;
pub use debug::{DEBUG_HEIGHT, DEBUG_WIDTH, draw_debug_view};
pub use scene::draw_game;

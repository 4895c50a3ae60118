//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, camera or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, PipeHit, bird_pipe_collision};
pub use state::{
    Bird, Difficulty, DifficultyTuning, GameEvent, GamePhase, GameState, Pipe, TuningTable,
};
pub use tick::{TickInput, tick};

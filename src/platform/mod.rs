//! Platform layer
//!
//! Native windows through minifb, plus the keyboard mapping:
//! - Esc (or closing the window) quits, Q quits from the game-over screen
//! - 1/2/3 pick a difficulty, Space is hold-to-flap
//! - U held raises the simulated arm, J/K/L held show 1/2/3 fingers

use std::time::Duration;

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::detect::SimulatedScene;
use crate::error::{Error, Result};
use crate::renderer::Canvas;
use crate::sim::{Difficulty, GamePhase};

/// Keyboard state sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Esc pressed or window closed
    pub quit: bool,
    /// Q pressed this tick
    pub quit_key: bool,
    pub difficulty_key: Option<Difficulty>,
    pub flap_held: bool,
    /// What the keyboard says the simulated player is doing
    pub scene: SimulatedScene,
}

impl InputSnapshot {
    /// Combine snapshots from several windows; whichever has focus wins
    pub fn merge(self, other: InputSnapshot) -> InputSnapshot {
        InputSnapshot {
            quit: self.quit || other.quit,
            quit_key: self.quit_key || other.quit_key,
            difficulty_key: self.difficulty_key.or(other.difficulty_key),
            flap_held: self.flap_held || other.flap_held,
            scene: SimulatedScene {
                arm_raised: self.scene.arm_raised || other.scene.arm_raised,
                fingers: self.scene.fingers.or(other.scene.fingers),
            },
        }
    }
}

/// Map key state to an input snapshot. `down` reports held keys, `pressed`
/// reports keys that went down this tick.
pub fn read_input(down: impl Fn(Key) -> bool, pressed: impl Fn(Key) -> bool) -> InputSnapshot {
    let difficulty_key = [
        (Key::Key1, Difficulty::Easy),
        (Key::Key2, Difficulty::Normal),
        (Key::Key3, Difficulty::Hard),
    ]
    .into_iter()
    .find(|&(key, _)| pressed(key))
    .map(|(_, d)| d);

    let fingers = [(Key::J, 1), (Key::K, 2), (Key::L, 3)]
        .into_iter()
        .find(|&(key, _)| down(key))
        .map(|(_, n)| n);

    InputSnapshot {
        quit: pressed(Key::Escape),
        quit_key: pressed(Key::Q),
        difficulty_key,
        flap_held: down(Key::Space),
        scene: SimulatedScene {
            arm_raised: down(Key::U),
            fingers,
        },
    }
}

/// Esc or a closed window quits from anywhere, Q only from the game-over screen
pub fn should_quit(input: &InputSnapshot, phase: GamePhase) -> bool {
    input.quit || (input.quit_key && phase == GamePhase::GameOver)
}

/// A fixed-size window showing one [`Canvas`]
pub struct GameWindow {
    window: Window,
}

impl GameWindow {
    pub fn new(title: &str, width: usize, height: usize, tick_hz: u32) -> Result<Self> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| Error::Window(e.to_string()))?;

        let frame_time = Duration::from_micros(1_000_000 / tick_hz.max(1) as u64);
        window.limit_update_rate(Some(frame_time));
        log::debug!("window '{title}' opened at {width}x{height}");

        Ok(Self { window })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn poll(&self) -> InputSnapshot {
        let mut input = read_input(
            |k| self.window.is_key_down(k),
            |k| self.window.is_key_pressed(k, KeyRepeat::No),
        );
        input.quit |= !self.window.is_open();
        input
    }

    /// Push the canvas to screen and pump window events
    pub fn present(&mut self, canvas: &Canvas) -> Result<()> {
        self.window
            .update_with_buffer(canvas.pixels(), canvas.width(), canvas.height())
            .map_err(|e| Error::Window(e.to_string()))
    }
}

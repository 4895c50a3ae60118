//! Fixed timestep simulation tick
//!
//! Advances the session by one frame. All timing is in ticks, so the same
//! seed and input sequence always yields the same run.

use super::collision::bird_pipe_collision;
use super::state::{Difficulty, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick, already reduced to discrete signals
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// One-shot arm-raise event from the gesture detector. This one gesture
    /// means "start" while awaiting start, "flap" while running and
    /// "restart" on the game-over screen.
    pub arm_up: bool,
    /// Flap key is held down (start/flap, never restart)
    pub flap_held: bool,
    /// Difficulty picked with a number key
    pub difficulty_key: Option<Difficulty>,
    /// Rate-limited finger count from the hand detector
    pub finger_count: Option<u8>,
}

impl TickInput {
    fn wants_flap(&self) -> bool {
        self.arm_up || self.flap_held
    }
}

/// Advance the game state by one tick and report what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::SelectingDifficulty => {
            // Keyboard wins over a simultaneous finger reading
            let choice = input
                .difficulty_key
                .or_else(|| input.finger_count.and_then(Difficulty::from_finger_count));
            if let Some(difficulty) = choice {
                state.select_difficulty(difficulty);
                events.push(GameEvent::DifficultySelected(difficulty));
            }
        }

        GamePhase::AwaitingStart => {
            if input.wants_flap() {
                state.bird.flap();
                state.phase = GamePhase::Running;
                log::info!("run started");
                events.push(GameEvent::Started);
            }
        }

        GamePhase::Running => {
            state.time_ticks += 1;
            step_running(state, input, &mut events);
        }

        GamePhase::GameOver => {
            if input.arm_up {
                state.reset();
                log::info!("restarting from difficulty menu");
                events.push(GameEvent::Restarted);
            }
        }
    }

    events
}

fn step_running(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    // Flap replaces velocity; gravity only applies on ticks without one
    if input.wants_flap() {
        state.bird.flap();
        events.push(GameEvent::Flapped);
    } else {
        state.bird.vel_y += state.gravity_step;
    }

    state.bird.pos.y += state.bird.vel_y;

    // Ceiling is a hard stop
    if state.bird.pos.y < 0.0 {
        state.bird.pos.y = 0.0;
        state.bird.vel_y = 0.0;
    }

    if state.bird.pos.y > FLOOR_Y {
        crash(state, events, "hit the ground");
        return;
    }

    // Speed can change mid-loop when a pipe is passed; later pipes this tick
    // move at the new speed.
    for i in 0..state.pipes.len() {
        state.pipes[i].x -= state.pipe_speed as f32;

        if let Some(hit) = bird_pipe_collision(&state.bird, &state.pipes[i]) {
            log::debug!("collision with {hit:?} segment of pipe at x={}", state.pipes[i].x);
            crash(state, events, "hit a pipe");
            return;
        }

        let pipe = &mut state.pipes[i];
        if !pipe.passed && pipe.is_behind(state.bird.pos.x) {
            pipe.passed = true;
            state.score += 1;
            events.push(GameEvent::Scored { score: state.score });
            if let Some(speed) = state.ramp_speed() {
                log::info!("score {} - pipe speed now {speed}", state.score);
                events.push(GameEvent::SpeedChanged { speed });
            }
        }
    }

    if state.pipes.first().is_some_and(|p| p.is_offscreen()) {
        state.pipes.remove(0);
    }

    let spawn_line = SCREEN_WIDTH as f32 - PIPE_DISTANCE;
    if state.pipes.last().is_none_or(|p| p.x < spawn_line) {
        state.spawn_pipe();
    }
}

fn crash(state: &mut GameState, events: &mut Vec<GameEvent>, reason: &str) {
    state.phase = GamePhase::GameOver;
    log::info!("game over: {reason} (score {})", state.score);
    events.push(GameEvent::Crashed { score: state.score });
}

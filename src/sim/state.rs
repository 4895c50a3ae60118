//! Game state and core simulation types
//!
//! Everything the tick function reads or writes lives here. Rendering only
//! ever borrows it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu: waiting for a key or finger count to pick a difficulty
    SelectingDifficulty,
    /// Difficulty chosen, first pipe spawned, bird waiting for the first flap
    AwaitingStart,
    /// Active gameplay
    Running,
    /// Run ended, simulation frozen until restart
    GameOver,
}

/// Difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const COUNT: usize = 3;
    pub const ALL: [Difficulty; Self::COUNT] =
        [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Row index into a [`TuningTable`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Menu mapping for a raised-finger count: 1, 2, 3 pick easy, normal, hard
    pub fn from_finger_count(count: u8) -> Option<Self> {
        match count {
            1..=3 => Some(Self::ALL[count as usize - 1]),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Per-difficulty balance numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTuning {
    /// Pipe speed at score 0 (pixels per tick)
    pub base_speed: u32,
    /// Pipe speed never ramps past this
    pub speed_cap: u32,
    /// Vertical opening between the two pipe segments
    pub pipe_gap: u32,
    /// Downward velocity added each tick without a flap
    pub gravity_step: f32,
}

impl DifficultyTuning {
    /// Pipe speed for a score: one step per score band, saturating at the cap
    pub fn speed_for_score(&self, score: u32) -> u32 {
        self.base_speed
            .saturating_add(score / SCORE_BAND)
            .min(self.speed_cap)
    }
}

/// Balance lookup table, one row per [`Difficulty`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningTable {
    pub rows: [DifficultyTuning; Difficulty::COUNT],
}

impl Default for TuningTable {
    fn default() -> Self {
        Self {
            rows: [
                DifficultyTuning {
                    base_speed: 2,
                    speed_cap: 6,
                    pipe_gap: 260,
                    gravity_step: 0.2,
                },
                DifficultyTuning {
                    base_speed: 3,
                    speed_cap: 8,
                    pipe_gap: 200,
                    gravity_step: 0.3,
                },
                DifficultyTuning {
                    base_speed: 5,
                    speed_cap: 10,
                    pipe_gap: 160,
                    gravity_step: 0.4,
                },
            ],
        }
    }
}

impl TuningTable {
    #[inline]
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyTuning {
        &self.rows[difficulty.index()]
    }
}

/// The player sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Sprite centre; x never changes
    pub pos: Vec2,
    /// Vertical velocity (pixels per tick, negative is up)
    pub vel_y: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BIRD_X, BIRD_START_Y),
            vel_y: 0.0,
        }
    }
}

impl Bird {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::new(BIRD_WIDTH, BIRD_HEIGHT))
    }

    /// Flap impulse: velocity is replaced, not accumulated
    pub fn flap(&mut self) {
        self.vel_y = FLAP_VELOCITY;
    }
}

/// A pair of pipe segments with a gap between them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Top edge of the upper segment
    pub top_y: f32,
    /// Top edge of the lower segment
    pub bottom_y: f32,
    /// Set once the bird has cleared this pipe
    pub passed: bool,
}

impl Pipe {
    /// Build a pipe at `x` whose opening is centred on `gap_center`
    pub fn new(x: f32, gap_center: i32, gap: u32) -> Self {
        let half_gap = (gap / 2) as i32;
        Self {
            x,
            top_y: (gap_center - half_gap) as f32 - PIPE_HEIGHT,
            bottom_y: (gap_center + half_gap) as f32,
            passed: false,
        }
    }

    pub fn top_bounds(&self) -> Aabb {
        Aabb::from_top_left(Vec2::new(self.x, self.top_y), Vec2::new(PIPE_WIDTH, PIPE_HEIGHT))
    }

    pub fn bottom_bounds(&self) -> Aabb {
        Aabb::from_top_left(
            Vec2::new(self.x, self.bottom_y),
            Vec2::new(PIPE_WIDTH, PIPE_HEIGHT),
        )
    }

    /// Vertical midpoint of the opening
    pub fn gap_center(&self) -> f32 {
        (self.top_y + PIPE_HEIGHT + self.bottom_y) / 2.0
    }

    /// Trailing edge is left of `bird_x`
    #[inline]
    pub fn is_behind(&self, bird_x: f32) -> bool {
        self.x + PIPE_WIDTH < bird_x
    }

    /// Fully scrolled off the left edge
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.x < -PIPE_WIDTH
    }
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    DifficultySelected(Difficulty),
    Started,
    Flapped,
    Scored { score: u32 },
    SpeedChanged { speed: u32 },
    Crashed { score: u32 },
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub difficulty: Option<Difficulty>,
    pub tuning: TuningTable,
    pub bird: Bird,
    /// Oldest (leftmost) first
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub pipe_speed: u32,
    pub pipe_gap: u32,
    pub gravity_step: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new session with the default balance table
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, TuningTable::default())
    }

    pub fn with_tuning(seed: u64, tuning: TuningTable) -> Self {
        Self {
            seed,
            phase: GamePhase::SelectingDifficulty,
            difficulty: None,
            tuning,
            bird: Bird::default(),
            pipes: Vec::new(),
            score: 0,
            pipe_speed: RESET_PIPE_SPEED,
            pipe_gap: RESET_PIPE_GAP,
            gravity_step: RESET_GRAVITY_STEP,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// True once the first flap has launched the bird
    pub fn started(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::GameOver)
    }

    /// Apply a difficulty row, clear the field and spawn the first pipe
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        let row = *self.tuning.get(difficulty);
        self.pipe_speed = row.base_speed;
        self.pipe_gap = row.pipe_gap;
        self.gravity_step = row.gravity_step;
        self.difficulty = Some(difficulty);
        self.pipes.clear();
        self.spawn_pipe();
        self.phase = GamePhase::AwaitingStart;
        log::info!(
            "difficulty {} selected (speed {}, gap {}, gravity {})",
            difficulty.as_str(),
            self.pipe_speed,
            self.pipe_gap,
            self.gravity_step
        );
    }

    /// Append a pipe at the right edge with a random gap centre
    pub fn spawn_pipe(&mut self) {
        let gap_center = self.rng.random_range(GAP_CENTER_MIN..=GAP_CENTER_MAX);
        let pipe = Pipe::new(SCREEN_WIDTH as f32, gap_center, self.pipe_gap);
        log::trace!("spawned pipe, gap centre {gap_center}");
        self.pipes.push(pipe);
    }

    /// Recompute pipe speed from the current score
    pub fn ramp_speed(&mut self) -> Option<u32> {
        let difficulty = self.difficulty?;
        let speed = self.tuning.get(difficulty).speed_for_score(self.score);
        if speed == self.pipe_speed {
            return None;
        }
        self.pipe_speed = speed;
        Some(speed)
    }

    /// Full reset back to the difficulty menu. The RNG keeps its stream.
    pub fn reset(&mut self) {
        self.phase = GamePhase::SelectingDifficulty;
        self.difficulty = None;
        self.bird = Bird {
            pos: Vec2::new(BIRD_X, (SCREEN_HEIGHT / 2) as f32),
            vel_y: 0.0,
        };
        self.pipes.clear();
        self.score = 0;
        self.pipe_speed = RESET_PIPE_SPEED;
        self.pipe_gap = RESET_PIPE_GAP;
        self.gravity_step = RESET_GRAVITY_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_finger_count_mapping() {
        assert_eq!(Difficulty::from_finger_count(0), None);
        assert_eq!(Difficulty::from_finger_count(1), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_finger_count(2), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_finger_count(3), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_finger_count(4), None);
    }

    #[test]
    fn test_normal_speed_ramp() {
        let normal = *TuningTable::default().get(Difficulty::Normal);
        for score in 0..5 {
            assert_eq!(normal.speed_for_score(score), 3);
        }
        for score in 5..10 {
            assert_eq!(normal.speed_for_score(score), 4);
        }
        assert_eq!(normal.speed_for_score(25), 8);
        assert_eq!(normal.speed_for_score(1000), 8);
    }

    #[test]
    fn test_speed_for_score_saturates() {
        let row = DifficultyTuning {
            base_speed: u32::MAX,
            speed_cap: u32::MAX,
            pipe_gap: 200,
            gravity_step: 0.3,
        };
        assert_eq!(row.speed_for_score(u32::MAX), u32::MAX);
        assert_eq!(row.speed_for_score(0), u32::MAX);
    }

    #[test]
    fn test_pipe_geometry() {
        let pipe = Pipe::new(800.0, 250, 160);
        // Opening spans centre +/- half gap
        assert_eq!(pipe.top_bounds().max.y, 170.0);
        assert_eq!(pipe.bottom_bounds().min.y, 330.0);
        assert_eq!(pipe.gap_center(), 250.0);
        assert!(!pipe.passed);
    }

    #[test]
    fn test_select_difficulty_spawns_one_pipe() {
        let mut state = GameState::new(7);
        state.select_difficulty(Difficulty::Easy);
        assert_eq!(state.phase, GamePhase::AwaitingStart);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipe_speed, 2);
        assert_eq!(state.pipe_gap, 260);
        assert_eq!(state.gravity_step, 0.2);
        assert_eq!(state.pipes[0].x, SCREEN_WIDTH as f32);
    }

    #[test]
    fn test_reset_restores_menu() {
        let mut state = GameState::new(7);
        state.select_difficulty(Difficulty::Hard);
        state.score = 12;
        state.bird.vel_y = 4.0;
        state.phase = GamePhase::GameOver;

        state.reset();
        assert_eq!(state.phase, GamePhase::SelectingDifficulty);
        assert_eq!(state.difficulty, None);
        assert!(state.pipes.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.bird.vel_y, 0.0);
        assert_eq!(state.bird.pos.y, 300.0);
        assert_eq!(state.pipe_speed, RESET_PIPE_SPEED);
        assert!(!state.started());
    }

    proptest! {
        #[test]
        fn speed_never_exceeds_cap(score in 0u32..100_000, row in 0usize..Difficulty::COUNT) {
            let tuning = TuningTable::default().rows[row];
            let speed = tuning.speed_for_score(score);
            prop_assert!(speed <= tuning.speed_cap);
            prop_assert!(speed >= tuning.base_speed);
        }

        #[test]
        fn speed_is_monotonic(score in 0u32..10_000, row in 0usize..Difficulty::COUNT) {
            let tuning = TuningTable::default().rows[row];
            prop_assert!(tuning.speed_for_score(score) <= tuning.speed_for_score(score + 1));
        }

        #[test]
        fn spawned_gap_stays_in_range(seed in any::<u64>()) {
            let mut state = GameState::new(seed);
            state.select_difficulty(Difficulty::Normal);
            let center = state.pipes[0].gap_center();
            prop_assert!(center >= GAP_CENTER_MIN as f32 && center <= GAP_CENTER_MAX as f32);
        }
    }
}

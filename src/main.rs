//! Gesture Flap entry point
//!
//! Opens the windows, wires the gesture detector to the simulation and runs
//! the fixed-rate game loop.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, bail};

use gesture_flap::Settings;
use gesture_flap::consts::*;
use gesture_flap::detect::{
    ArmDetector, FingerCounter, FrameSource, GestureDetector, HandEstimator, PoseEstimator,
    SharedScene,
};
use gesture_flap::platform::{GameWindow, InputSnapshot, should_quit};
use gesture_flap::renderer::{Canvas, DEBUG_HEIGHT, DEBUG_WIDTH, draw_debug_view, draw_game};
use gesture_flap::sim::{GamePhase, GameState, TickInput, tick};

/// Game instance holding all state
struct Game<S: FrameSource, P, H> {
    state: GameState,
    detector: GestureDetector<S, P, H>,
    /// Keyboard-driven landmarks; absent when real models are loaded
    scene: Option<SharedScene>,
    window: GameWindow,
    canvas: Canvas,
    debug: Option<(GameWindow, Canvas)>,
}

impl<S, P, H> Game<S, P, H>
where
    S: FrameSource,
    P: PoseEstimator,
    H: HandEstimator,
{
    fn new(
        settings: &Settings,
        seed: u64,
        source: S,
        (pose, hand): (P, H),
        scene: Option<SharedScene>,
    ) -> anyhow::Result<Self> {
        let detector = GestureDetector::new(
            source,
            ArmDetector::new(pose, settings.arm_cooldown(), settings.mirror_camera),
            FingerCounter::new(hand, settings.finger_cooldown()),
        );

        let window = GameWindow::new("Gesture Flap", SCREEN_WIDTH, SCREEN_HEIGHT, TICK_HZ)
            .context("failed to open game window")?;

        let debug = if settings.debug_window {
            let win = GameWindow::new("Gesture Flap - Camera", DEBUG_WIDTH, DEBUG_HEIGHT, TICK_HZ)
                .context("failed to open camera window")?;
            Some((win, Canvas::new(DEBUG_WIDTH, DEBUG_HEIGHT)))
        } else {
            None
        };

        Ok(Self {
            state: GameState::with_tuning(seed, settings.tuning.clone()),
            detector,
            scene,
            window,
            canvas: Canvas::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            debug,
        })
    }

    fn poll_input(&mut self) -> InputSnapshot {
        let input = self.window.poll();
        match &self.debug {
            Some((win, _)) if win.is_open() => input.merge(win.poll()),
            Some(_) => {
                log::info!("camera window closed");
                self.debug = None;
                input
            }
            None => input,
        }
    }

    /// Run one frame. Returns false once the player quits.
    fn frame(&mut self) -> anyhow::Result<bool> {
        let input = self.poll_input();
        if should_quit(&input, self.state.phase) {
            return Ok(false);
        }

        if let Some(scene) = &self.scene {
            scene.set(input.scene);
        }
        let arm_up = self.detector.poll_arm_event();
        // Fingers only matter on the difficulty menu
        let finger_count = if self.state.phase == GamePhase::SelectingDifficulty {
            self.detector.poll_finger_count()
        } else {
            self.detector.skip_finger_count();
            None
        };

        let tick_input = TickInput {
            arm_up,
            flap_held: input.flap_held,
            difficulty_key: input.difficulty_key,
            finger_count,
        };
        for event in tick(&mut self.state, &tick_input) {
            log::debug!("{event:?}");
        }

        draw_game(&mut self.canvas, &self.state);
        self.window.present(&self.canvas)?;

        if let Some((win, canvas)) = &mut self.debug {
            draw_debug_view(canvas, self.detector.debug_view());
            win.present(canvas)?;
        }

        Ok(true)
    }

    fn run(mut self) -> anyhow::Result<()> {
        log::info!("seed {}", self.state.seed);
        while self.window.is_open() {
            if !self.frame()? {
                break;
            }
        }
        log::info!("quitting with score {}", self.state.score);
        self.detector.release();
        Ok(())
    }
}

struct Args {
    settings: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut settings = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                let path = args.next().context("--settings needs a path")?;
                settings = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("usage: gesture-flap [--settings <path>]");
                std::process::exit(0);
            }
            other => bail!("unknown argument '{other}'"),
        }
    }
    Ok(Args { settings })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Gesture Flap starting...");

    let args = parse_args()?;
    let settings = Settings::load_or_default(args.settings.as_deref())?;
    let seed = settings.seed.unwrap_or_else(clock_seed);

    #[cfg(feature = "camera")]
    let source = gesture_flap::detect::WebCamera::open(settings.camera_index)?;
    #[cfg(not(feature = "camera"))]
    let source = gesture_flap::detect::SyntheticCamera::new(320, 240);

    #[cfg(feature = "models")]
    let (estimators, scene) = {
        use gesture_flap::detect::{OnnxHandEstimator, OnnxPoseEstimator};
        let pose = OnnxPoseEstimator::load(&settings.models)?;
        let hand = OnnxHandEstimator::load(&settings.models)?;
        ((pose, hand), None)
    };
    #[cfg(not(feature = "models"))]
    let (estimators, scene) = {
        use gesture_flap::detect::{SimulatedHandEstimator, SimulatedPoseEstimator, shared_scene};
        log::info!("no landmark models, hold U to raise the arm and J/K/L to show fingers");
        let scene = shared_scene();
        let pose = SimulatedPoseEstimator::new(scene.clone());
        let hand = SimulatedHandEstimator::new(scene.clone());
        ((pose, hand), Some(scene))
    };

    Game::new(&settings, seed, source, estimators, scene)?.run()
}

//! Keyboard-driven landmark simulation
//!
//! Lets the game run without a landmark model. The window writes the held
//! simulation keys into a shared [`SimulatedScene`] every tick; the estimators
//! below turn that scene into plausible landmarks regardless of frame content.

use std::cell::Cell;
use std::rc::Rc;

use super::frame::Frame;
use super::landmarks::{HandEstimator, HandLandmarks, Landmark, PoseEstimator, PoseLandmarks};

/// What the simulated player is doing right now
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulatedScene {
    /// Left arm raised above the shoulder
    pub arm_raised: bool,
    /// Hand in view with this many fingers raised (0-3), or no hand
    pub fingers: Option<u8>,
}

/// Handle shared between the window (writer) and the estimators (readers)
pub type SharedScene = Rc<Cell<SimulatedScene>>;

pub fn shared_scene() -> SharedScene {
    Rc::new(Cell::new(SimulatedScene::default()))
}

/// Produces a standing figure with the left arm up or down
pub struct SimulatedPoseEstimator {
    scene: SharedScene,
}

impl SimulatedPoseEstimator {
    pub fn new(scene: SharedScene) -> Self {
        Self { scene }
    }
}

impl PoseEstimator for SimulatedPoseEstimator {
    fn estimate(&mut self, _frame: &Frame) -> Option<PoseLandmarks> {
        let scene = self.scene.get();
        let mut points = vec![Landmark::new(0.5, 0.2); PoseLandmarks::COUNT];

        points[PoseLandmarks::LEFT_SHOULDER] = Landmark::new(0.62, 0.42);
        points[PoseLandmarks::RIGHT_SHOULDER] = Landmark::new(0.38, 0.42);
        points[PoseLandmarks::RIGHT_ELBOW] = Landmark::new(0.34, 0.58);
        points[PoseLandmarks::RIGHT_WRIST] = Landmark::new(0.33, 0.72);
        points[PoseLandmarks::LEFT_HIP] = Landmark::new(0.58, 0.85);
        points[PoseLandmarks::RIGHT_HIP] = Landmark::new(0.42, 0.85);

        if scene.arm_raised {
            points[PoseLandmarks::LEFT_ELBOW] = Landmark::new(0.70, 0.30);
            points[PoseLandmarks::LEFT_WRIST] = Landmark::new(0.72, 0.16);
        } else {
            points[PoseLandmarks::LEFT_ELBOW] = Landmark::new(0.66, 0.58);
            points[PoseLandmarks::LEFT_WRIST] = Landmark::new(0.67, 0.72);
        }

        Some(PoseLandmarks { points })
    }
}

/// Produces a hand with the requested number of counted fingers raised
pub struct SimulatedHandEstimator {
    scene: SharedScene,
}

impl SimulatedHandEstimator {
    pub fn new(scene: SharedScene) -> Self {
        Self { scene }
    }
}

impl HandEstimator for SimulatedHandEstimator {
    fn estimate(&mut self, _frame: &Frame) -> Option<HandLandmarks> {
        let raised = self.scene.get().fingers?.min(3) as usize;
        let mut points = vec![Landmark::new(0.5, 0.7); HandLandmarks::COUNT];
        points[HandLandmarks::WRIST] = Landmark::new(0.5, 0.8);

        for (i, &(tip, pip)) in HandLandmarks::COUNTED_FINGERS.iter().enumerate() {
            let x = 0.45 + 0.05 * i as f32;
            points[pip] = Landmark::new(x, 0.55);
            points[tip] = if i < raised {
                Landmark::new(x, 0.35)
            } else {
                Landmark::new(x, 0.62)
            };
        }

        Some(HandLandmarks { points })
    }
}

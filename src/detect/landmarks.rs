//! Body and hand landmarks, the estimator seam, and the per-frame classifiers
//!
//! Landmark coordinates are normalized to the frame: `x` and `y` in `[0, 1]`,
//! `y` growing downward, so "higher on screen" means "smaller y".

use super::frame::Frame;

/// A single normalized landmark
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// True if this point sits higher in the frame than `other`
    #[inline]
    pub fn is_above(&self, other: &Landmark) -> bool {
        self.y < other.y
    }
}

/// 33-point body pose (BlazePose topology)
#[derive(Clone, Debug, PartialEq)]
pub struct PoseLandmarks {
    pub points: Vec<Landmark>,
}

impl PoseLandmarks {
    pub const COUNT: usize = 33;
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;

    /// Upper-body skeleton edges drawn on the debug view
    pub const CONNECTIONS: &'static [(usize, usize)] = &[
        (11, 12),
        (11, 13),
        (13, 15),
        (12, 14),
        (14, 16),
        (11, 23),
        (12, 24),
        (23, 24),
    ];

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index)
    }

    pub fn left_shoulder(&self) -> Option<&Landmark> {
        self.get(Self::LEFT_SHOULDER)
    }

    pub fn left_wrist(&self) -> Option<&Landmark> {
        self.get(Self::LEFT_WRIST)
    }
}

/// 21-point hand skeleton
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub points: Vec<Landmark>,
}

impl HandLandmarks {
    pub const COUNT: usize = 21;
    pub const WRIST: usize = 0;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;

    /// (tip, middle joint) pairs of the fingers that are counted
    pub const COUNTED_FINGERS: [(usize, usize); 3] = [
        (Self::INDEX_TIP, Self::INDEX_PIP),
        (Self::MIDDLE_TIP, Self::MIDDLE_PIP),
        (Self::RING_TIP, Self::RING_PIP),
    ];
}

/// Binary arm pose
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ArmState {
    Up,
    #[default]
    Down,
}

impl ArmState {
    pub fn label(&self) -> &'static str {
        match self {
            ArmState::Up => "ARM UP",
            ArmState::Down => "ARM DOWN",
        }
    }
}

/// Arm is up when the left wrist is above the left shoulder.
/// No pose, or a pose missing either point, counts as down.
pub fn classify_arm(pose: Option<&PoseLandmarks>) -> ArmState {
    let Some(pose) = pose else {
        return ArmState::Down;
    };
    match (pose.left_wrist(), pose.left_shoulder()) {
        (Some(wrist), Some(shoulder)) if wrist.is_above(shoulder) => ArmState::Up,
        _ => ArmState::Down,
    }
}

/// Number of index/middle/ring fingers whose tip is above its middle joint
pub fn count_raised_fingers(hand: &HandLandmarks) -> u8 {
    HandLandmarks::COUNTED_FINGERS
        .iter()
        .filter(|&&(tip, pip)| match (hand.points.get(tip), hand.points.get(pip)) {
            (Some(tip), Some(pip)) => tip.is_above(pip),
            _ => false,
        })
        .count() as u8
}

/// Pose landmark model. Owned by the detector for its whole lifetime.
pub trait PoseEstimator {
    fn estimate(&mut self, frame: &Frame) -> Option<PoseLandmarks>;
}

/// Hand landmark model. Only the first detected hand is reported.
pub trait HandEstimator {
    fn estimate(&mut self, frame: &Frame) -> Option<HandLandmarks>;
}

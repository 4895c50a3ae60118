//! Gesture event detection
//!
//! Turns a noisy per-frame landmark classifier into clean discrete inputs:
//! a one-shot arm-raise event and a rate-limited finger count.

#[cfg(feature = "camera")]
pub mod camera;
pub mod debounce;
pub mod detector;
pub mod frame;
pub mod landmarks;
pub mod model_input;
#[cfg(feature = "models")]
pub mod onnx;
pub mod simulated;

#[cfg(feature = "camera")]
pub use camera::WebCamera;
pub use debounce::{ARM_COOLDOWN, EdgeTrigger, FINGER_COOLDOWN, RateLimiter};
pub use detector::{ArmDetector, DebugView, FingerCounter, GestureDetector};
pub use frame::{Frame, FrameSlot, FrameSource, SyntheticCamera};
pub use landmarks::{
    ArmState, HandEstimator, HandLandmarks, Landmark, PoseEstimator, PoseLandmarks, classify_arm,
    count_raised_fingers,
};
pub use model_input::{Letterbox, decode_hand, decode_pose, letterbox_rgb};
#[cfg(feature = "models")]
pub use onnx::{OnnxHandEstimator, OnnxPoseEstimator};
pub use simulated::{
    SharedScene, SimulatedHandEstimator, SimulatedPoseEstimator, SimulatedScene, shared_scene,
};

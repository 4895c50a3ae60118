//! Gesture event detector
//!
//! [`ArmDetector`] and [`FingerCounter`] are independent: the only thing they
//! share is the [`FrameSlot`] the caller passes between them. The
//! [`GestureDetector`] facade owns the camera, both estimators and the slot.

use std::time::{Duration, Instant};

use super::debounce::{EdgeTrigger, RateLimiter};
use super::frame::{Frame, FrameSlot, FrameSource};
use super::landmarks::{
    ArmState, HandEstimator, PoseEstimator, PoseLandmarks, classify_arm, count_raised_fingers,
};

/// What the detector saw on the most recent polls, for the debug window
#[derive(Clone, Debug, Default)]
pub struct DebugView {
    /// Frame as shown to the pose model (mirrored if enabled)
    pub frame: Option<Frame>,
    pub pose: Option<PoseLandmarks>,
    pub arm_state: ArmState,
    /// Finger count of the last detected hand, even when rate-limited
    pub fingers: Option<u8>,
}

/// Arm-raise event detector
pub struct ArmDetector<P> {
    estimator: P,
    trigger: EdgeTrigger,
    mirror: bool,
}

impl<P: PoseEstimator> ArmDetector<P> {
    pub fn new(estimator: P, cooldown: Duration, mirror: bool) -> Self {
        Self {
            estimator,
            trigger: EdgeTrigger::new(cooldown),
            mirror,
        }
    }

    /// Capture a frame, cache it in `slot` and report whether the arm was
    /// just raised. A failed capture is "no event" and leaves the slot alone.
    pub fn poll(
        &mut self,
        source: &mut dyn FrameSource,
        slot: &mut FrameSlot,
        view: &mut DebugView,
        now: Instant,
    ) -> bool {
        let Some(frame) = source.capture() else {
            log::warn!("camera read failed, skipping arm detection this tick");
            return false;
        };

        let shown = if self.mirror { frame.mirrored() } else { frame.clone() };
        slot.store(frame);

        let pose = self.estimator.estimate(&shown);
        let state = classify_arm(pose.as_ref());
        let event = self.trigger.update(state, now);
        if event {
            log::debug!("arm raised");
        }

        view.frame = Some(shown);
        view.pose = pose;
        view.arm_state = state;
        event
    }

    pub fn arm_state(&self) -> ArmState {
        self.trigger.previous()
    }
}

/// Rate-limited finger counter
pub struct FingerCounter<H> {
    estimator: H,
    limiter: RateLimiter,
}

impl<H: HandEstimator> FingerCounter<H> {
    pub fn new(estimator: H, cooldown: Duration) -> Self {
        Self {
            estimator,
            limiter: RateLimiter::new(cooldown),
        }
    }

    /// Count raised fingers on the cached frame. `None` when nothing has been
    /// captured yet, no hand is visible, or the cooldown has not elapsed.
    pub fn poll(&mut self, slot: &FrameSlot, view: &mut DebugView, now: Instant) -> Option<u8> {
        let frame = slot.latest()?;
        let Some(hand) = self.estimator.estimate(frame) else {
            view.fingers = None;
            return None;
        };

        let count = count_raised_fingers(&hand);
        view.fingers = Some(count);

        if self.limiter.admit(now) {
            log::debug!("finger count {count}");
            Some(count)
        } else {
            None
        }
    }
}

/// Owns the camera and both classifiers. The camera is released on drop.
pub struct GestureDetector<S: FrameSource, P, H> {
    source: S,
    slot: FrameSlot,
    arm: ArmDetector<P>,
    fingers: FingerCounter<H>,
    view: DebugView,
    released: bool,
}

impl<S, P, H> GestureDetector<S, P, H>
where
    S: FrameSource,
    P: PoseEstimator,
    H: HandEstimator,
{
    pub fn new(source: S, arm: ArmDetector<P>, fingers: FingerCounter<H>) -> Self {
        Self {
            source,
            slot: FrameSlot::new(),
            arm,
            fingers,
            view: DebugView::default(),
            released: false,
        }
    }

    pub fn poll_arm_event(&mut self) -> bool {
        self.poll_arm_event_at(Instant::now())
    }

    pub fn poll_arm_event_at(&mut self, now: Instant) -> bool {
        self.arm
            .poll(&mut self.source, &mut self.slot, &mut self.view, now)
    }

    pub fn poll_finger_count(&mut self) -> Option<u8> {
        self.poll_finger_count_at(Instant::now())
    }

    pub fn poll_finger_count_at(&mut self, now: Instant) -> Option<u8> {
        self.fingers.poll(&self.slot, &mut self.view, now)
    }

    /// Called on ticks where fingers are not polled, so the debug view does
    /// not keep showing the last menu reading
    pub fn skip_finger_count(&mut self) {
        self.view.fingers = None;
    }

    pub fn debug_view(&self) -> &DebugView {
        &self.view
    }

    /// Release the camera. Safe to call more than once.
    pub fn release(&mut self) {
        if !self.released {
            self.source.release();
            self.slot.clear();
            self.released = true;
            log::info!("gesture detector released");
        }
    }
}

impl<S: FrameSource, P, H> Drop for GestureDetector<S, P, H> {
    fn drop(&mut self) {
        if !self.released {
            self.source.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::debounce::{ARM_COOLDOWN, FINGER_COOLDOWN};
    use crate::detect::simulated::{
        SimulatedHandEstimator, SimulatedPoseEstimator, SimulatedScene, shared_scene,
    };
    use std::cell::Cell;
    use std::rc::Rc;

    /// Replays a script of capture successes/failures
    struct ScriptedCamera {
        script: Vec<bool>,
        next: usize,
        released: Rc<Cell<u32>>,
    }

    impl FrameSource for ScriptedCamera {
        fn capture(&mut self) -> Option<Frame> {
            let ok = self.script.get(self.next).copied().unwrap_or(true);
            self.next += 1;
            ok.then(|| Frame::new(vec![0; 12], 2, 2))
        }

        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn detector(
        script: Vec<bool>,
    ) -> (
        GestureDetector<ScriptedCamera, SimulatedPoseEstimator, SimulatedHandEstimator>,
        crate::detect::SharedScene,
        Rc<Cell<u32>>,
    ) {
        let scene = shared_scene();
        let released = Rc::new(Cell::new(0));
        let camera = ScriptedCamera {
            script,
            next: 0,
            released: released.clone(),
        };
        let det = GestureDetector::new(
            camera,
            ArmDetector::new(SimulatedPoseEstimator::new(scene.clone()), ARM_COOLDOWN, true),
            FingerCounter::new(SimulatedHandEstimator::new(scene.clone()), FINGER_COOLDOWN),
        );
        (det, scene, released)
    }

    fn set(scene: &crate::detect::SharedScene, arm_raised: bool, fingers: Option<u8>) {
        scene.set(SimulatedScene { arm_raised, fingers });
    }

    #[test]
    fn test_arm_event_on_raise() {
        let (mut det, scene, _) = detector(vec![]);
        let t0 = Instant::now();
        assert!(!det.poll_arm_event_at(t0));
        set(&scene, true, None);
        assert!(det.poll_arm_event_at(t0 + ms(16)));
        assert!(!det.poll_arm_event_at(t0 + ms(32)));
        assert_eq!(det.debug_view().arm_state, ArmState::Up);
    }

    #[test]
    fn test_capture_failure_is_no_event() {
        let (mut det, scene, _) = detector(vec![false]);
        set(&scene, true, Some(2));
        assert!(!det.poll_arm_event_at(Instant::now()));
        // Nothing captured yet, so the finger counter has nothing to look at
        assert_eq!(det.poll_finger_count_at(Instant::now()), None);
    }

    #[test]
    fn test_finger_count_needs_a_frame() {
        let (mut det, scene, _) = detector(vec![]);
        set(&scene, false, Some(2));
        assert_eq!(det.poll_finger_count_at(Instant::now()), None);
        det.poll_arm_event_at(Instant::now());
        assert_eq!(det.poll_finger_count_at(Instant::now()), Some(2));
    }

    #[test]
    fn test_finger_count_rate_limited() {
        let (mut det, scene, _) = detector(vec![]);
        set(&scene, false, Some(2));
        let t0 = Instant::now();

        let mut seen = Vec::new();
        for i in 0..=75 {
            let now = t0 + ms(i * 20);
            det.poll_arm_event_at(now);
            if let Some(n) = det.poll_finger_count_at(now) {
                seen.push((i * 20, n));
            }
            // The hand stays visible in the debug view between reports
            assert_eq!(det.debug_view().fingers, Some(2));
        }
        assert_eq!(seen, vec![(0, 2), (1020, 2)]);
    }

    #[test]
    fn test_skipping_fingers_clears_debug_reading() {
        let (mut det, scene, _) = detector(vec![]);
        set(&scene, false, Some(3));
        let t0 = Instant::now();
        det.poll_arm_event_at(t0);
        assert_eq!(det.poll_finger_count_at(t0), Some(3));
        assert_eq!(det.debug_view().fingers, Some(3));

        det.poll_arm_event_at(t0 + ms(16));
        det.skip_finger_count();
        assert_eq!(det.debug_view().fingers, None);
    }

    #[test]
    fn test_no_hand_is_none() {
        let (mut det, _scene, _) = detector(vec![]);
        det.poll_arm_event_at(Instant::now());
        assert_eq!(det.poll_finger_count_at(Instant::now()), None);
        assert_eq!(det.debug_view().fingers, None);
    }

    #[test]
    fn test_arm_and_fingers_are_independent() {
        let (mut det, scene, _) = detector(vec![]);
        let t0 = Instant::now();
        det.poll_arm_event_at(t0);
        set(&scene, true, Some(1));
        // Finger polling does not consume or fire arm events
        assert_eq!(det.poll_finger_count_at(t0 + ms(5)), Some(1));
        assert!(det.poll_arm_event_at(t0 + ms(10)));
    }

    #[test]
    fn test_release_once() {
        let (mut det, _scene, released) = detector(vec![]);
        det.release();
        det.release();
        drop(det);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_drop_releases_camera() {
        let (det, _scene, released) = detector(vec![]);
        drop(det);
        assert_eq!(released.get(), 1);
    }
}

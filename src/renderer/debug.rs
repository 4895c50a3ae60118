//! Annotated camera view: frame, pose skeleton and detector status

use super::canvas::Canvas;
use crate::detect::{ArmState, DebugView, Landmark, PoseLandmarks};

pub const DEBUG_WIDTH: usize = 480;
pub const DEBUG_HEIGHT: usize = 360;

const BONE: u32 = 0xFFE0E0E0;
const JOINT: u32 = 0xFF40FF40;
const SHOULDER: u32 = 0xFFFF0000;
const WRIST: u32 = 0xFF0000FF;
const ARM_UP: u32 = 0xFF00FF00;
const ARM_DOWN: u32 = 0xFFFF4040;
const FINGERS: u32 = 0xFFFFFF00;
const NO_SIGNAL: u32 = 0xFF202020;

pub fn draw_debug_view(canvas: &mut Canvas, view: &DebugView) {
    match &view.frame {
        Some(frame) => canvas.blit_frame(frame),
        None => {
            canvas.clear(NO_SIGNAL);
            let (cx, cy) = (canvas.width() as i32 / 2, canvas.height() as i32 / 2);
            canvas.draw_text_centered("NO CAMERA FRAME", cx, cy, 3, 0xFFAAAAAA);
        }
    }

    if let Some(pose) = &view.pose {
        draw_skeleton(canvas, pose);
    }

    let (label, color) = match view.arm_state {
        ArmState::Up => (view.arm_state.label(), ARM_UP),
        ArmState::Down => (view.arm_state.label(), ARM_DOWN),
    };
    canvas.draw_label(label, 12, 12, 4, color);

    if let Some(n) = view.fingers {
        canvas.draw_label(&format!("FINGERS: {n}"), 12, 48, 4, FINGERS);
    }
}

fn to_px(canvas: &Canvas, lm: &Landmark) -> (i32, i32) {
    (
        (lm.x * canvas.width() as f32).round() as i32,
        (lm.y * canvas.height() as f32).round() as i32,
    )
}

fn draw_skeleton(canvas: &mut Canvas, pose: &PoseLandmarks) {
    for &(a, b) in PoseLandmarks::CONNECTIONS {
        if let (Some(pa), Some(pb)) = (pose.get(a), pose.get(b)) {
            let (x0, y0) = to_px(canvas, pa);
            let (x1, y1) = to_px(canvas, pb);
            canvas.draw_line(x0, y0, x1, y1, 2, BONE);
        }
    }
    for lm in &pose.points {
        let (x, y) = to_px(canvas, lm);
        canvas.fill_circle(x, y, 2, JOINT);
    }

    if let Some(shoulder) = pose.left_shoulder() {
        let (x, y) = to_px(canvas, shoulder);
        canvas.fill_circle(x, y, 8, SHOULDER);
    }
    if let Some(wrist) = pose.left_wrist() {
        let (x, y) = to_px(canvas, wrist);
        canvas.fill_circle(x, y, 8, WRIST);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::Frame;

    fn pose_with_arm(shoulder: Landmark, wrist: Landmark) -> PoseLandmarks {
        let mut points = vec![Landmark::new(0.5, 0.5); PoseLandmarks::COUNT];
        points[PoseLandmarks::LEFT_SHOULDER] = shoulder;
        points[PoseLandmarks::LEFT_WRIST] = wrist;
        PoseLandmarks { points }
    }

    #[test]
    fn test_shoulder_and_wrist_markers() {
        let mut canvas = Canvas::new(DEBUG_WIDTH, DEBUG_HEIGHT);
        let view = DebugView {
            frame: Some(Frame::new(vec![0; 3], 1, 1)),
            pose: Some(pose_with_arm(Landmark::new(0.25, 0.5), Landmark::new(0.75, 0.25))),
            arm_state: ArmState::Up,
            fingers: None,
        };
        draw_debug_view(&mut canvas, &view);

        assert_eq!(canvas.pixel(120, 180), Some(SHOULDER));
        assert_eq!(canvas.pixel(360, 90), Some(WRIST));
    }

    #[test]
    fn test_landmarks_outside_frame_are_clipped() {
        let mut canvas = Canvas::new(DEBUG_WIDTH, DEBUG_HEIGHT);
        let mut pose = pose_with_arm(Landmark::new(0.4, 0.5), Landmark::new(1.3, 1.1));
        pose.points[PoseLandmarks::LEFT_HIP] = Landmark::new(1.2, 1.0);
        pose.points[PoseLandmarks::RIGHT_HIP] = Landmark::new(1.1, 1.0);
        pose.points[PoseLandmarks::RIGHT_SHOULDER] = Landmark::new(-0.2, -0.1);
        let view = DebugView {
            frame: None,
            pose: Some(pose),
            arm_state: ArmState::Down,
            fingers: Some(3),
        };
        draw_debug_view(&mut canvas, &view);
        assert_eq!(canvas.pixel(192, 180), Some(SHOULDER));
    }

    #[test]
    fn test_missing_frame_clears_to_no_signal() {
        let mut canvas = Canvas::new(DEBUG_WIDTH, DEBUG_HEIGHT);
        draw_debug_view(&mut canvas, &DebugView::default());
        let corner = canvas.pixel(DEBUG_WIDTH as i32 - 1, DEBUG_HEIGHT as i32 - 1);
        assert_eq!(corner, Some(NO_SIGNAL));
    }
}

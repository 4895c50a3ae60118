//! Tensor preparation and output decoding for the landmark models
//!
//! Both models take a square NHWC `f32` image in `[0, 1]` and report landmark
//! coordinates in pixels of that square. Frames are letterboxed into the
//! square and the landmarks are mapped back to normalized frame coordinates.

use super::frame::Frame;
use super::landmarks::{HandLandmarks, Landmark, PoseLandmarks};

/// Values per pose landmark: x, y, z, visibility, presence
pub const POSE_STRIDE: usize = 5;
/// Values per hand landmark: x, y, z
pub const HAND_STRIDE: usize = 3;

/// How a frame was fitted into the model's square input
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
    pub orig_w: u32,
    pub orig_h: u32,
}

impl Letterbox {
    pub fn new(width: u32, height: u32, target: u32) -> Self {
        let scale = target as f32 / width.max(height).max(1) as f32;
        let new_w = (width as f32 * scale).round().max(1.0) as u32;
        let new_h = (height as f32 * scale).round().max(1.0) as u32;
        Self {
            scale,
            pad_x: (target.saturating_sub(new_w) / 2) as f32,
            pad_y: (target.saturating_sub(new_h) / 2) as f32,
            orig_w: width,
            orig_h: height,
        }
    }

    /// Model-input pixel to normalized frame coordinates. Points in the
    /// padding land outside `[0, 1]`; they are not clamped.
    pub fn to_normalized(&self, x: f32, y: f32) -> (f32, f32) {
        let fx = (x - self.pad_x) / self.scale;
        let fy = (y - self.pad_y) / self.scale;
        (fx / self.orig_w.max(1) as f32, fy / self.orig_h.max(1) as f32)
    }
}

/// Letterbox `frame` into a `size`x`size` RGB tensor body (row-major NHWC
/// without the batch axis), bilinearly resampled, padding left black.
pub fn letterbox_rgb(frame: &Frame, size: u32) -> (Vec<f32>, Letterbox) {
    let lb = Letterbox::new(frame.width, frame.height, size);
    let n = size as usize;
    let mut data = vec![0.0f32; n * n * 3];
    if frame.width == 0 || frame.height == 0 {
        return (data, lb);
    }

    let (x_end, y_end) = (
        lb.pad_x + frame.width as f32 * lb.scale,
        lb.pad_y + frame.height as f32 * lb.scale,
    );
    for oy in 0..n {
        let cy = oy as f32 + 0.5;
        if cy < lb.pad_y || cy >= y_end {
            continue;
        }
        let sy = (cy - lb.pad_y) / lb.scale - 0.5;
        for ox in 0..n {
            let cx = ox as f32 + 0.5;
            if cx < lb.pad_x || cx >= x_end {
                continue;
            }
            let sx = (cx - lb.pad_x) / lb.scale - 0.5;
            let rgb = sample_bilinear(frame, sx, sy);
            data[(oy * n + ox) * 3..][..3].copy_from_slice(&rgb);
        }
    }
    (data, lb)
}

fn sample_bilinear(frame: &Frame, x: f32, y: f32) -> [f32; 3] {
    let max_x = frame.width as f32 - 1.0;
    let max_y = frame.height as f32 - 1.0;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);
    let (x0, y0) = (x.floor(), y.floor());
    let (x1, y1) = ((x0 + 1.0).min(max_x), (y0 + 1.0).min(max_y));
    let (fx, fy) = (x - x0, y - y0);

    let fetch = |px: f32, py: f32| -> [f32; 3] {
        let i = (py as usize * frame.width as usize + px as usize) * 3;
        [
            frame.rgb[i] as f32 / 255.0,
            frame.rgb[i + 1] as f32 / 255.0,
            frame.rgb[i + 2] as f32 / 255.0,
        ]
    };
    let (c00, c10, c01, c11) = (fetch(x0, y0), fetch(x1, y0), fetch(x0, y1), fetch(x1, y1));

    let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
    std::array::from_fn(|c| lerp(lerp(c00[c], c10[c], fx), lerp(c01[c], c11[c], fx), fy))
}

fn decode_points(
    flat: &[f32],
    count: usize,
    stride: usize,
    lb: &Letterbox,
) -> Option<Vec<Landmark>> {
    if flat.len() < count * stride {
        log::warn!(
            "unexpected landmark output length: got {}, need {}",
            flat.len(),
            count * stride
        );
        return None;
    }
    let points = flat
        .chunks_exact(stride)
        .take(count)
        .map(|v| {
            let (x, y) = lb.to_normalized(v[0], v[1]);
            Landmark {
                x,
                y,
                z: v[2] / (lb.scale * lb.orig_w.max(1) as f32),
            }
        })
        .collect();
    Some(points)
}

/// Pose from the landmark output and the model's pose-presence score.
/// `None` below `threshold` or on a malformed output.
pub fn decode_pose(
    flat: &[f32],
    presence: f32,
    threshold: f32,
    lb: &Letterbox,
) -> Option<PoseLandmarks> {
    if presence < threshold {
        return None;
    }
    let points = decode_points(flat, PoseLandmarks::COUNT, POSE_STRIDE, lb)?;
    Some(PoseLandmarks { points })
}

/// Hand from the landmark output and the model's hand-presence score
pub fn decode_hand(
    flat: &[f32],
    presence: f32,
    threshold: f32,
    lb: &Letterbox,
) -> Option<HandLandmarks> {
    if presence < threshold {
        return None;
    }
    let points = decode_points(flat, HandLandmarks::COUNT, HAND_STRIDE, lb)?;
    Some(HandLandmarks { points })
}

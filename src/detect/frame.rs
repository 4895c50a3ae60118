//! Camera frames, frame sources and the single-slot frame cache

use std::time::Instant;

/// One RGB8 camera frame
#[derive(Clone, Debug)]
pub struct Frame {
    /// Tightly packed RGB, `width * height * 3` bytes
    pub rgb: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timestamp: Instant,
}

impl Frame {
    pub fn new(rgb: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(rgb.len(), width as usize * height as usize * 3);
        Self {
            rgb,
            width,
            height,
            timestamp: Instant::now(),
        }
    }

    /// Horizontally flipped copy, so the view behaves like a mirror
    pub fn mirrored(&self) -> Frame {
        let row_len = self.width as usize * 3;
        let mut rgb = Vec::with_capacity(self.rgb.len());
        for row in self.rgb.chunks_exact(row_len) {
            for px in row.chunks_exact(3).rev() {
                rgb.extend_from_slice(px);
            }
        }
        Frame {
            rgb,
            width: self.width,
            height: self.height,
            timestamp: self.timestamp,
        }
    }

    /// Pixel at `(x, y)` as `0xAARRGGBB`
    #[inline]
    pub fn argb_at(&self, x: u32, y: u32) -> u32 {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        0xFF00_0000
            | (self.rgb[i] as u32) << 16
            | (self.rgb[i + 1] as u32) << 8
            | self.rgb[i + 2] as u32
    }
}

/// Anything that can hand out camera frames, one blocking call per tick
pub trait FrameSource {
    /// Grab the next frame. `None` means the read failed this tick.
    fn capture(&mut self) -> Option<Frame>;

    /// Release the underlying device. Called once when the detector shuts down.
    fn release(&mut self) {}
}

/// Latest-frame-wins cache shared between the arm and finger detectors
#[derive(Debug, Default)]
pub struct FrameSlot {
    frame: Option<Frame>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self { frame: None }
    }

    /// Replace whatever was cached
    pub fn store(&mut self, frame: Frame) {
        self.frame = Some(frame);
    }

    pub fn latest(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_none()
    }

    pub fn clear(&mut self) {
        self.frame = None;
    }
}

/// Frame source used when no camera is attached: a dim moving gradient
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    frame_index: u32,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        log::info!("using synthetic camera ({width}x{height})");
        Self {
            width,
            height,
            frame_index: 0,
        }
    }
}

impl FrameSource for SyntheticCamera {
    fn capture(&mut self) -> Option<Frame> {
        let shift = self.frame_index;
        self.frame_index = self.frame_index.wrapping_add(1);

        let mut rgb = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for y in 0..self.height {
            for x in 0..self.width {
                let v = ((x + y).wrapping_add(shift) % 64) as u8;
                rgb.extend_from_slice(&[20 + v / 2, 24 + v / 2, 32 + v]);
            }
        }
        Some(Frame::new(rgb, self.width, self.height))
    }

    fn release(&mut self) {
        log::debug!("synthetic camera released after {} frames", self.frame_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_flips_rows() {
        // 2x1: red, blue
        let frame = Frame::new(vec![255, 0, 0, 0, 0, 255], 2, 1);
        let mirrored = frame.mirrored();
        assert_eq!(mirrored.rgb, vec![0, 0, 255, 255, 0, 0]);
        assert_eq!(mirrored.argb_at(0, 0), 0xFF0000FF);
    }

    #[test]
    fn test_slot_keeps_latest_only() {
        let mut slot = FrameSlot::new();
        assert!(slot.is_empty());
        slot.store(Frame::new(vec![1, 1, 1], 1, 1));
        slot.store(Frame::new(vec![2, 2, 2], 1, 1));
        assert_eq!(slot.latest().map(|f| f.rgb[0]), Some(2));
        slot.clear();
        assert!(slot.latest().is_none());
    }

    #[test]
    fn test_synthetic_camera_frame_size() {
        let mut cam = SyntheticCamera::new(8, 4);
        let frame = cam.capture().expect("synthetic capture never fails");
        assert_eq!(frame.rgb.len(), 8 * 4 * 3);
    }
}

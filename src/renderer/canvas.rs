//! ARGB software framebuffer with clipped drawing primitives

use super::font::{self, ADVANCE, GLYPH_H, GLYPH_W};
use crate::detect::Frame;

pub struct Canvas {
    width: usize,
    height: usize,
    buf: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buf: vec![0xFF00_0000; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixels, ready for the window
    pub fn pixels(&self) -> &[u32] {
        &self.buf
    }

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.buf[i])
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.buf[i] = color;
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(y as usize * self.width + x as usize)
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for row in y0..y1 {
            let start = row as usize * self.width;
            self.buf[start + x0 as usize..start + x1 as usize].fill(color);
        }
    }

    pub fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w - 1, y, 1, h, color);
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Bresenham line, `thickness` pixels wide
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        let half = thickness / 2;

        loop {
            self.fill_rect(x - half, y - half, thickness, thickness, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let rows = font::glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                        self.fill_rect(
                            cx + col * scale,
                            y + row as i32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            cx += ADVANCE * scale;
        }
    }

    /// Text horizontally centred on `center_x`
    pub fn draw_text_centered(
        &mut self,
        text: &str,
        center_x: i32,
        y: i32,
        scale: i32,
        color: u32,
    ) {
        let x = center_x - font::text_width(text, scale) / 2;
        self.draw_text(text, x, y, scale, color);
    }

    /// Text with a dark backing box for legibility over busy backgrounds
    pub fn draw_label(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let w = font::text_width(text, scale);
        let (pad, h) = (scale * 2, GLYPH_H * scale);
        self.fill_rect(x - pad, y - pad, w + pad * 2, h + pad * 2, 0xC000_0000);
        self.draw_text(text, x, y, scale, color);
    }

    /// Nearest-neighbour stretch of a camera frame over the whole canvas
    pub fn blit_frame(&mut self, frame: &Frame) {
        if frame.width == 0 || frame.height == 0 {
            return;
        }
        for y in 0..self.height {
            let fy = (y * frame.height as usize / self.height) as u32;
            for x in 0..self.width {
                let fx = (x * frame.width as usize / self.width) as u32;
                self.buf[y * self.width + x] = frame.argb_at(fx, fy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_clips() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(-2, -2, 4, 4, 0xFFFFFFFF);
        assert_eq!(canvas.pixel(0, 0), Some(0xFFFFFFFF));
        assert_eq!(canvas.pixel(1, 1), Some(0xFFFFFFFF));
        assert_eq!(canvas.pixel(2, 2), Some(0xFF000000));
        // Entirely off-canvas is a no-op
        canvas.fill_rect(10, 10, 5, 5, 0xFF00FF00);
        canvas.fill_rect(3, 0, -2, 2, 0xFF00FF00);
        assert_eq!(canvas.pixel(3, 0), Some(0xFF000000));
    }

    #[test]
    fn test_fill_rect_past_right_edge_is_noop() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(6, 3, 1, 1, 0xFFFFFFFF);
        canvas.fill_rect(4, 0, 2, 4, 0xFFFFFFFF);
        canvas.fill_rect(0, 4, 4, 2, 0xFFFFFFFF);
        assert!(canvas.pixels().iter().all(|&p| p == 0xFF000000));
    }

    #[test]
    fn test_line_off_canvas_is_clipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(12, 9, 15, 10, 2, 0xFFFF0000);
        canvas.draw_line(-5, -5, 4, 4, 3, 0xFFFF0000);
        assert_eq!(canvas.pixel(4, 4), Some(0xFFFF0000));
    }

    #[test]
    fn test_line_endpoints() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(1, 1, 8, 6, 1, 0xFFFF0000);
        assert_eq!(canvas.pixel(1, 1), Some(0xFFFF0000));
        assert_eq!(canvas.pixel(8, 6), Some(0xFFFF0000));
    }

    #[test]
    fn test_blit_scales_frame() {
        // 1x1 red frame fills the whole canvas
        let frame = Frame::new(vec![255, 0, 0], 1, 1);
        let mut canvas = Canvas::new(3, 2);
        canvas.blit_frame(&frame);
        assert!(canvas.pixels().iter().all(|&p| p == 0xFFFF0000));
    }
}

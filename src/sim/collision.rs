//! Collision detection between the bird and pipe segments
//!
//! Plain axis-aligned box overlap. No tolerance, no per-pixel masks.

use glam::Vec2;

use super::state::{Bird, Pipe};

/// Axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_top_left(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Which part of a pipe the bird ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeHit {
    Top,
    Bottom,
}

/// Test the bird against both segments of a pipe
pub fn bird_pipe_collision(bird: &Bird, pipe: &Pipe) -> Option<PipeHit> {
    let bird_box = bird.bounds();
    if bird_box.overlaps(&pipe.top_bounds()) {
        Some(PipeHit::Top)
    } else if bird_box.overlaps(&pipe.bottom_bounds()) {
        Some(PipeHit::Bottom)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_overlap_by_one_pixel() {
        let a = Aabb::from_top_left(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_top_left(Vec2::new(9.0, 9.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::from_top_left(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let right = Aabb::from_top_left(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let below = Aabb::from_top_left(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_center_box_size() {
        let b = Aabb::from_center_size(Vec2::new(150.0, 300.0), Vec2::new(34.0, 24.0));
        assert_eq!(b.min, Vec2::new(133.0, 288.0));
        assert_eq!(b.size(), Vec2::new(34.0, 24.0));
    }

    #[test]
    fn test_bird_in_gap_misses() {
        let bird = Bird::default();
        // Gap centred on the bird, pipe directly over it
        let pipe = Pipe::new(BIRD_X - PIPE_WIDTH / 2.0, BIRD_START_Y as i32, 200);
        assert_eq!(bird_pipe_collision(&bird, &pipe), None);
    }

    #[test]
    fn test_bird_hits_top_segment() {
        let bird = Bird::default();
        // Opening well below the bird
        let pipe = Pipe::new(BIRD_X - PIPE_WIDTH / 2.0, 400, 100);
        assert_eq!(bird_pipe_collision(&bird, &pipe), Some(PipeHit::Top));
    }

    #[test]
    fn test_bird_hits_bottom_segment() {
        let bird = Bird::default();
        let pipe = Pipe::new(BIRD_X - PIPE_WIDTH / 2.0, 150, 100);
        assert_eq!(bird_pipe_collision(&bird, &pipe), Some(PipeHit::Bottom));
    }
}

//! Hand landmark types and the detection capability.
//!
//! Joint indices follow the usual 21-point hand skeleton: the wrist, then
//! four joints per digit from the palm outwards.

use anyhow::Result;

use crate::annotate;
use crate::models::{Frame, Point, RED, WHITE};

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// Bones drawn for the skeleton overlay
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (17, 18), (18, 19), (19, 20),
    (0, 17),
];

/// One joint in normalized image coordinates (`x`, `y` in `[0, 1]`)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Pixel position for a frame of the given size.
    ///
    /// Coordinates are clamped to `[-1, 2]` first, so the result stays within
    /// one frame size of the image.
    pub fn to_pixel(&self, width: u32, height: u32) -> Point {
        let scale = |v: f32, size: u32| (v.clamp(-1.0, 2.0) * size as f32).round() as i32;
        Point::new(scale(self.x, width), scale(self.y, height))
    }
}

/// All joints of a single detected hand
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    pub points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a slice, `None` unless it holds exactly 21 joints
    pub fn from_slice(points: &[Landmark]) -> Option<Self> {
        let points: [Landmark; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(Self { points })
    }

    pub fn get(&self, index: usize) -> Landmark {
        self.points[index]
    }

    /// Overlay bones and joints onto the frame
    pub fn draw(&self, frame: &mut Frame) {
        let (w, h) = frame.dimensions();
        for (a, b) in HAND_CONNECTIONS {
            annotate::draw_thick_line(frame, self.points[a].to_pixel(w, h), self.points[b].to_pixel(w, h), WHITE, 2);
        }
        for lm in &self.points {
            annotate::draw_marker(frame, lm.to_pixel(w, h), 3, RED);
        }
    }
}

/// Capability that finds hands in a frame.
///
/// Confidence gating is the implementation's concern; hands that do not pass
/// it are simply not returned.
pub trait LandmarkDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<LandmarkSet>>;
}

/// Detector that never sees a hand
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHands;

impl LandmarkDetector for NoHands {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<LandmarkSet>> {
        Ok(Vec::new())
    }
}

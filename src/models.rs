use image::{Rgb, RgbImage};

/// A frame in RGB encoding. Owned by whoever is processing the current iteration.
pub type Frame = RgbImage;

pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
pub const CYAN: Rgb<u8> = Rgb([0, 255, 255]);
pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const PANEL: Rgb<u8> = Rgb([40, 40, 40]);

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_f32(&self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }
}

impl From<imageproc::point::Point<i32>> for Point {
    fn from(p: imageproc::point::Point<i32>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Line of feedback text placed on a frame.
///
/// Pixels only carry the background panel; glyphs are left to the display sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    /// Baseline-left anchor in frame coordinates
    pub anchor: Point,
    pub color: Rgb<u8>,
}

impl Caption {
    pub fn new(text: impl Into<String>, anchor: Point, color: Rgb<u8>) -> Self {
        Self {
            text: text.into(),
            anchor,
            color,
        }
    }
}

/// Result of processing one frame
#[derive(Debug, Clone)]
pub struct AnnotatedFrame {
    pub image: Frame,
    pub captions: Vec<Caption>,
}

impl AnnotatedFrame {
    pub fn new(image: Frame) -> Self {
        Self {
            image,
            captions: Vec::new(),
        }
    }

    /// All caption texts joined, mostly for logging
    pub fn caption_text(&self) -> String {
        self.captions
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

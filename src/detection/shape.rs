use image::GrayImage;
use tracing::debug;

use crate::annotate;
use crate::config::ShapeConfig;
use crate::detection::contours::{self, Contour};
use crate::detection::preprocessing;
use crate::models::{CYAN, Frame};

/// Searches frames for a roughly square quadrilateral
#[derive(Debug, Clone, Default)]
pub struct ShapeValidator {
    config: ShapeConfig,
}

impl ShapeValidator {
    pub fn new(config: ShapeConfig) -> Self {
        Self { config }
    }

    /// Edge map the square search runs on
    pub fn edges(&self, frame: &Frame) -> GrayImage {
        let gray = preprocessing::to_grayscale(frame);
        let blurred = preprocessing::apply_blur(&gray, self.config.blur_sigma);
        preprocessing::detect_edges(&blurred, self.config.canny_low, self.config.canny_high)
    }

    /// Check an already-approximated polygon against the square criteria
    pub fn is_square(&self, polygon: &Contour) -> bool {
        if polygon.len() != 4 || !polygon.is_convex() {
            return false;
        }
        let Some(aspect) = polygon.bounding_box().and_then(|b| b.aspect_ratio()) else {
            return false;
        };
        let area = polygon.area();
        let (min_aspect, max_aspect) = self.config.aspect_range;
        let (min_area, max_area) = self.config.area_range;
        aspect > min_aspect && aspect < max_aspect && area >= min_area && area <= max_area
    }

    /// First external contour of the edge map whose polygon passes `is_square`
    pub fn find_square(&self, edges: &GrayImage) -> Option<Contour> {
        contours::find_external_contours(edges)
            .iter()
            .map(|c| c.approximate_polygon(self.config.epsilon_factor))
            .find(|polygon| self.is_square(polygon))
    }

    /// Run the search on a frame, outlining the square when found
    pub fn detect(&self, frame: &mut Frame) -> bool {
        let edges = self.edges(frame);
        self.detect_in(frame, &edges)
    }

    /// Same as `detect` with a precomputed edge map
    pub fn detect_in(&self, frame: &mut Frame, edges: &GrayImage) -> bool {
        match self.find_square(edges) {
            Some(square) => {
                debug!(area = square.area(), "square candidate accepted");
                annotate::draw_closed_polyline(frame, &square.points, CYAN, 3);
                true
            }
            None => false,
        }
    }
}

/// Counts consecutive frames with a square in view
#[derive(Debug, Clone)]
pub struct ShapeConfirmation {
    count: u32,
    threshold: u32,
}

impl ShapeConfirmation {
    pub fn new(threshold: u32) -> Self {
        Self { count: 0, threshold }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn is_confirmed(&self) -> bool {
        self.count >= self.threshold
    }

    /// Record one frame; returns whether the threshold has been reached
    pub fn observe(&mut self, found: bool) -> bool {
        self.count = if found {
            (self.count + 1).min(self.threshold)
        } else {
            0
        };
        self.is_confirmed()
    }
}

impl Default for ShapeConfirmation {
    fn default() -> Self {
        Self::new(ShapeConfig::default().confirmation_frames)
    }
}

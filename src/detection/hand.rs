use image::GrayImage;
use tracing::debug;

use crate::annotate;
use crate::config::HandConfig;
use crate::detection::contours::{self, Contour};
use crate::models::{BLUE, Frame, GREEN, Point};

/// Result of a successful hand search
#[derive(Debug, Clone)]
pub struct HandLocation {
    /// Topmost contour point, taken as the fingertip
    pub tip: Point,
    pub contour: Contour,
    pub area: f64,
}

/// Picks the largest skin region and reports its topmost point
#[derive(Debug, Clone, Default)]
pub struct HandLocator {
    config: HandConfig,
}

impl HandLocator {
    pub fn new(config: HandConfig) -> Self {
        Self { config }
    }

    /// Search the mask without touching any frame
    pub fn find(&self, mask: &GrayImage) -> Option<HandLocation> {
        let all = contours::find_external_contours(mask);
        let largest = contours::largest_contour(&all)?;
        let area = largest.area();
        if area < self.config.min_area {
            debug!(area, "largest skin region below minimum area");
            return None;
        }
        let tip = largest.topmost()?;
        Some(HandLocation {
            tip,
            contour: largest.clone(),
            area,
        })
    }

    /// Locate the hand and draw its outline and tip onto the frame
    pub fn locate(&self, frame: &mut Frame, mask: &GrayImage) -> Option<Point> {
        let found = self.find(mask)?;
        annotate::draw_closed_polyline(frame, &found.contour.points, GREEN, 2);
        annotate::draw_marker(frame, found.tip, 6, BLUE);
        Some(found.tip)
    }
}

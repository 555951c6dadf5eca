use image::GrayImage;

use crate::config::SkinConfig;
use crate::detection::preprocessing;
use crate::models::Frame;

/// Isolates skin-toned pixels with a fixed YCrCb chroma window
#[derive(Debug, Clone, Default)]
pub struct SkinSegmenter {
    config: SkinConfig,
}

impl SkinSegmenter {
    pub fn new(config: SkinConfig) -> Self {
        Self { config }
    }

    /// Binary mask (0 / non-zero) with the frame's dimensions
    pub fn segment(&self, frame: &Frame) -> GrayImage {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return GrayImage::new(width, height);
        }

        let mask = preprocessing::chroma_in_range(frame, self.config.cr_range, self.config.cb_range);
        let mask = preprocessing::apply_blur(&mask, self.config.blur_sigma);
        let mask = preprocessing::apply_median(&mask, self.config.median_radius);

        // Speckle removal, then reconnect the hand region
        let mask = preprocessing::erode_square(&mask, self.config.erode_iterations);
        preprocessing::dilate_square(&mask, self.config.dilate_iterations)
    }
}

pub mod predictor;
pub mod trajectory;

use image::GrayImage;

pub use predictor::{Estimate, MotionPredictor};
pub use trajectory::TrajectoryBuffer;

use crate::annotate::{add_caption, draw_marker};
use crate::config::Config;
use crate::detection::{HandLocator, SkinSegmenter};
use crate::models::{AnnotatedFrame, Caption, Frame, GREEN, Point, RED};

/// Output of one tracking step
#[derive(Debug, Clone)]
pub struct TrackFrame {
    pub frame: AnnotatedFrame,
    pub mask: GrayImage,
    pub measurement: Option<Point>,
    pub prediction: Option<Point>,
}

/// Skin mask → fingertip → filtered position → trail
#[derive(Debug, Clone)]
pub struct HandTracker {
    segmenter: SkinSegmenter,
    locator: HandLocator,
    predictor: MotionPredictor,
    trajectory: TrajectoryBuffer,
    thickness: u32,
}

impl HandTracker {
    pub fn new(config: &Config) -> Self {
        Self {
            segmenter: SkinSegmenter::new(config.skin.clone()),
            locator: HandLocator::new(config.hand.clone()),
            predictor: MotionPredictor::new(&config.predictor),
            trajectory: TrajectoryBuffer::new(config.trajectory.capacity),
            thickness: config.trajectory.thickness,
        }
    }

    pub fn trajectory(&self) -> &TrajectoryBuffer {
        &self.trajectory
    }

    pub fn predictor(&self) -> &MotionPredictor {
        &self.predictor
    }

    pub fn process(&mut self, mut frame: Frame) -> TrackFrame {
        let mask = self.segmenter.segment(&frame);
        let measurement = self.locator.locate(&mut frame, &mask);
        let prediction = self.predictor.step(measurement);

        if let Some(m) = measurement {
            draw_marker(&mut frame, m, 6, GREEN);
        }
        if let Some(p) = prediction {
            draw_marker(&mut frame, p, 6, RED);
        }

        // Before the predictor is seeded this records a gap.
        self.trajectory.push(prediction);
        self.trajectory.render(&mut frame, RED, self.thickness);

        let mut out = AnnotatedFrame::new(frame);
        add_caption(&mut out, Caption::new("Hand tracker (AirDraw)", Point::new(20, 40), GREEN));

        TrackFrame {
            frame: out,
            mask,
            measurement,
            prediction,
        }
    }
}

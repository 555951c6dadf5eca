//! Two-phase visual authentication: a finger-count sequence followed by a
//! held-up square.

pub mod fingers;
pub mod landmarks;
pub mod sequence;

use std::time::Duration;

use image::GrayImage;
use image::imageops::flip_horizontal;
use tracing::{debug, info, warn};

pub use fingers::count_fingers;
pub use landmarks::{Landmark, LandmarkDetector, LandmarkSet, NoHands};
pub use sequence::{GestureSequenceMatcher, SequenceEvent, StabilityTimer, TARGET_SEQUENCE};

use crate::annotate::add_caption;
use crate::config::Config;
use crate::detection::{ShapeConfirmation, ShapeValidator};
use crate::models::{AnnotatedFrame, CYAN, Caption, Frame, GREEN, Point, RED};

/// Authentication phase. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AuthState {
    AwaitingGestures,
    GestureComplete,
    AwaitingShape,
    Authenticated,
}

impl AuthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingGestures => "awaiting-gestures",
            Self::GestureComplete => "gesture-complete",
            Self::AwaitingShape => "awaiting-shape",
            Self::Authenticated => "authenticated",
        }
    }
}

/// Output of one authentication step
#[derive(Debug, Clone)]
pub struct AuthFrame {
    pub frame: AnnotatedFrame,
    /// Edge map searched for the square, when the shape phase ran
    pub edges: Option<GrayImage>,
}

/// Routes frames through gesture entry, then shape confirmation
#[derive(Debug, Clone)]
pub struct AuthenticationStateMachine {
    state: AuthState,
    matcher: GestureSequenceMatcher,
    validator: ShapeValidator,
    confirmation: ShapeConfirmation,
    mirror: bool,
    last_count: Option<u8>,
}

impl AuthenticationStateMachine {
    pub fn new(config: &Config) -> Self {
        Self {
            state: AuthState::AwaitingGestures,
            matcher: GestureSequenceMatcher::new(config.gesture.clone()),
            validator: ShapeValidator::new(config.shape.clone()),
            confirmation: ShapeConfirmation::new(config.shape.confirmation_frames),
            mirror: config.mirror,
            last_count: None,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }

    pub fn sequence(&self) -> &[u8] {
        self.matcher.sequence()
    }

    pub fn shape_count(&self) -> u32 {
        self.confirmation.count()
    }

    /// Finger count seen on the latest gesture frame
    pub fn last_count(&self) -> Option<u8> {
        self.last_count
    }

    fn advance(&mut self, next: AuthState) {
        if next <= self.state {
            warn!(from = self.state.as_str(), to = next.as_str(), "ignoring backward transition");
            return;
        }
        info!(from = self.state.as_str(), to = next.as_str(), "authentication phase changed");
        self.state = next;
    }

    /// Process one frame in whichever phase is active.
    ///
    /// Detection always sees the mirrored frame before any caption panel is
    /// painted over it.
    pub fn process(&mut self, frame: Frame, detector: &mut dyn LandmarkDetector, now: Duration) -> AuthFrame {
        let image = if self.mirror { flip_horizontal(&frame) } else { frame };
        let mut out = AnnotatedFrame::new(image);

        let (edges, captions) = match self.state {
            AuthState::AwaitingGestures => (None, self.gesture_step(&mut out, detector, now)),
            AuthState::GestureComplete => {
                self.advance(AuthState::AwaitingShape);
                let (edges, captions) = self.shape_step(&mut out);
                (Some(edges), captions)
            }
            AuthState::AwaitingShape => {
                let (edges, captions) = self.shape_step(&mut out);
                (Some(edges), captions)
            }
            AuthState::Authenticated => (None, Vec::new()),
        };

        add_caption(&mut out, Caption::new("Security mode", Point::new(20, 40), RED));
        for caption in captions {
            add_caption(&mut out, caption);
        }

        AuthFrame { frame: out, edges }
    }

    fn gesture_step(&mut self, out: &mut AnnotatedFrame, detector: &mut dyn LandmarkDetector, now: Duration) -> Vec<Caption> {
        let hands = match detector.detect(&out.image) {
            Ok(hands) => hands,
            Err(e) => {
                warn!(error = %e, "landmark detection failed, treating as no hand");
                Vec::new()
            }
        };

        // Single-hand use: the last reported hand wins.
        let mut count = None;
        for hand in &hands {
            count = Some(count_fingers(hand));
            hand.draw(&mut out.image);
        }
        self.last_count = count;

        if self.matcher.observe(count, now) == SequenceEvent::Complete {
            self.advance(AuthState::GestureComplete);
            self.advance(AuthState::AwaitingShape);
        }

        let fingers = count.map_or_else(|| "-".to_string(), |n| n.to_string());
        vec![
            Caption::new(format!("Fingers: {}", fingers), Point::new(30, 80), GREEN),
            Caption::new(self.matcher.progress_text(), Point::new(30, 140), CYAN),
        ]
    }

    fn shape_step(&mut self, out: &mut AnnotatedFrame) -> (GrayImage, Vec<Caption>) {
        let edges = self.validator.edges(&out.image);
        let found = self.validator.detect_in(&mut out.image, &edges);
        if self.confirmation.observe(found) {
            info!("square confirmed");
            self.advance(AuthState::Authenticated);
        } else {
            debug!(found, count = self.confirmation.count(), "square confirmation");
        }

        let status = if found {
            Caption::new(
                format!("Square detected ({}/{})", self.confirmation.count(), self.confirmation.threshold()),
                Point::new(30, 180),
                GREEN,
            )
        } else {
            Caption::new("Searching for a square...", Point::new(30, 180), RED)
        };
        let captions = vec![
            Caption::new("System unlocked", Point::new(30, 70), GREEN),
            Caption::new("Show a square", Point::new(30, 120), CYAN),
            status,
        ];
        (edges, captions)
    }
}

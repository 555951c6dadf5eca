use std::path::PathBuf;

use anyhow::Result;
use image::GrayImage;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::auth::{AuthState, AuthenticationStateMachine, LandmarkDetector};
use crate::clock::{Clock, MonotonicClock};
use crate::config::Config;
use crate::models::{AnnotatedFrame, Frame, Point};
use crate::tracking::HandTracker;

/// Debug configuration for per-frame intermediate images
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// The directory must be empty or non-existent
    pub fn new(output_dir: PathBuf) -> Result<Self> {
        prepare_empty_dir(&output_dir, "Debug")?;
        Ok(Self { output_dir })
    }

    fn save(&self, frame_index: u64, stage: &str, image: &GrayImage) -> Result<()> {
        let path = self.output_dir.join(format!("{:06}_{}.png", frame_index, stage));
        image
            .save(&path)
            .map_err(|e| anyhow::anyhow!("Failed to save debug image {}: {}", path.display(), e))
    }
}

/// Create `dir` if missing, fail if it already holds anything
pub fn prepare_empty_dir(dir: &std::path::Path, what: &str) -> Result<()> {
    if dir.exists() {
        let entries = std::fs::read_dir(dir)?;
        if entries.count() > 0 {
            anyhow::bail!("{} directory is not empty: {}", what, dir.display());
        }
    } else {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Snapshot of a session after the latest frame
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub id: Uuid,
    pub state: AuthState,
    pub sequence: Vec<u8>,
    pub shape_count: u32,
    pub last_prediction: Option<Point>,
    pub trajectory_len: usize,
    pub frames: u64,
}

/// All mutable per-user state: authentication progress, then hand tracking.
///
/// Frames are processed one at a time, each to completion.
pub struct Session<C: Clock = MonotonicClock> {
    id: Uuid,
    clock: C,
    detector: Box<dyn LandmarkDetector>,
    auth: AuthenticationStateMachine,
    tracker: HandTracker,
    debug: Option<DebugConfig>,
    frames: u64,
    last_prediction: Option<Point>,
}

impl Session<MonotonicClock> {
    pub fn new(config: Config, detector: Box<dyn LandmarkDetector>) -> Self {
        Self::with_clock(config, detector, MonotonicClock::new())
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(config: Config, detector: Box<dyn LandmarkDetector>, clock: C) -> Self {
        Self {
            id: Uuid::new_v4(),
            clock,
            detector,
            auth: AuthenticationStateMachine::new(&config),
            tracker: HandTracker::new(&config),
            debug: None,
            frames: 0,
            last_prediction: None,
        }
    }

    /// Save intermediate masks to `output_dir` (must be empty or non-existent)
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        self.debug = Some(DebugConfig::new(output_dir)?);
        Ok(self)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> AuthState {
        self.auth.state()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn tracker(&self) -> &HandTracker {
        &self.tracker
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            id: self.id,
            state: self.auth.state(),
            sequence: self.auth.sequence().to_vec(),
            shape_count: self.auth.shape_count(),
            last_prediction: self.last_prediction,
            trajectory_len: self.tracker.trajectory().len(),
            frames: self.frames,
        }
    }

    /// Run one frame through whichever stage is active.
    ///
    /// Detection misses never fail; only debug output I/O can.
    pub fn process(&mut self, frame: Frame) -> Result<AnnotatedFrame> {
        let span = info_span!("session", id = %self.id, frame = self.frames);
        let _enter = span.enter();
        let index = self.frames;
        self.frames += 1;

        if self.auth.is_authenticated() {
            let step = self.tracker.process(frame);
            self.last_prediction = step.prediction;
            if let Some(debug) = &self.debug {
                debug.save(index, "skin_mask", &step.mask)?;
            }
            return Ok(step.frame);
        }

        let now = self.clock.now();
        let step = self.auth.process(frame, self.detector.as_mut(), now);
        if let (Some(debug), Some(edges)) = (&self.debug, &step.edges) {
            debug.save(index, "edges", edges)?;
        }
        if self.auth.is_authenticated() {
            info!("security complete, activating tracker");
        }
        Ok(step.frame)
    }
}

//! Frame sources and sinks backed by image directories, plus landmark replay.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use image::ImageReader;
use tracing::debug;

use crate::auth::landmarks::{LANDMARK_COUNT, Landmark, LandmarkDetector, LandmarkSet};
use crate::models::{AnnotatedFrame, Frame};
use crate::pipeline::prepare_empty_dir;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Yields frames until the stream ends (`Ok(None)`)
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// Receives annotated frames for presentation
pub trait FrameSink {
    fn present(&mut self, frame: &AnnotatedFrame) -> Result<()>;
}

/// Reads image files from a directory in file-name order
#[derive(Debug)]
pub struct DirectorySource {
    files: Vec<PathBuf>,
    next: usize,
}

impl DirectorySource {
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!("Frame directory not found: {}", dir.display());
        }
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if path.is_file() && is_image {
                files.push(path);
            }
        }
        files.sort();
        debug!(count = files.len(), dir = %dir.display(), "frame directory opened");
        Ok(Self { files, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for DirectorySource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(path) = self.files.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        let img = ImageReader::open(path)?
            .decode()
            .map_err(|e| anyhow::anyhow!("Failed to decode {}: {}", path.display(), e))?;
        Ok(Some(img.to_rgb8()))
    }
}

/// Writes annotated frames as numbered PNGs
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: u64,
}

impl DirectorySink {
    /// The directory must be empty or non-existent
    pub fn create(dir: PathBuf) -> Result<Self> {
        prepare_empty_dir(&dir, "Output")?;
        Ok(Self { dir, written: 0 })
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for DirectorySink {
    fn present(&mut self, frame: &AnnotatedFrame) -> Result<()> {
        let path = self.dir.join(format!("{:06}.png", self.written));
        frame
            .image
            .save(&path)
            .map_err(|e| anyhow::anyhow!("Failed to save frame {}: {}", path.display(), e))?;
        debug!(path = %path.display(), captions = %frame.caption_text(), "frame written");
        self.written += 1;
        Ok(())
    }
}

/// Landmarks recorded per frame, replayed in call order.
///
/// One hand per line: `frame_index x0 y0 x1 y1 ... x20 y20`. Blank lines and
/// lines starting with `#` are skipped.
#[derive(Debug, Clone, Default)]
pub struct ReplayLandmarks {
    frames: HashMap<u64, Vec<LandmarkSet>>,
    calls: u64,
}

impl ReplayLandmarks {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read landmark file {}: {}", path.display(), e))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut frames: HashMap<u64, Vec<LandmarkSet>> = HashMap::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let index: u64 = fields
                .next()
                .unwrap_or_default()
                .parse()
                .map_err(|e| anyhow::anyhow!("line {}: bad frame index: {}", line_no + 1, e))?;
            let coords = fields
                .map(|f| f.parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| anyhow::anyhow!("line {}: bad coordinate: {}", line_no + 1, e))?;
            if coords.iter().any(|c| !c.is_finite()) {
                anyhow::bail!("line {}: coordinates must be finite", line_no + 1);
            }
            if coords.len() != LANDMARK_COUNT * 2 {
                anyhow::bail!(
                    "line {}: expected {} coordinates, found {}",
                    line_no + 1,
                    LANDMARK_COUNT * 2,
                    coords.len()
                );
            }
            let joints: Vec<Landmark> = coords.chunks(2).map(|c| Landmark::new(c[0], c[1])).collect();
            let hand = LandmarkSet::from_slice(&joints)
                .ok_or_else(|| anyhow::anyhow!("line {}: wrong joint count", line_no + 1))?;
            frames.entry(index).or_default().push(hand);
        }

        Ok(Self { frames, calls: 0 })
    }

    /// Number of frames with at least one hand
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkDetector for ReplayLandmarks {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<LandmarkSet>> {
        let hands = self.frames.get(&self.calls).cloned().unwrap_or_default();
        self.calls += 1;
        Ok(hands)
    }
}

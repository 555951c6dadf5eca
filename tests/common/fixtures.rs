#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use airdraw::auth::landmarks::{
    INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP, THUMB_IP, THUMB_TIP,
};
use airdraw::auth::{Landmark, LandmarkDetector, LandmarkSet};
use airdraw::{Config, Frame, ManualClock, Session};
use image::{GrayImage, Luma, Rgb, RgbImage};

/// Lands inside the default YCrCb skin window (Cr ≈ 160, Cb ≈ 108)
pub const SKIN: Rgb<u8> = Rgb([200, 140, 120]);

/// Frame-to-frame step used by the gesture tests
pub const FRAME_STEP: Duration = Duration::from_millis(100);

pub fn blank_frame(width: u32, height: u32) -> Frame {
    RgbImage::new(width, height)
}

/// Black frame with a filled block of `color`
pub fn frame_with_block(width: u32, height: u32, x: u32, y: u32, size: u32, color: Rgb<u8>) -> Frame {
    RgbImage::from_fn(width, height, |px, py| {
        if px >= x && px < x + size && py >= y && py < y + size {
            color
        } else {
            Rgb([0, 0, 0])
        }
    })
}

pub fn skin_frame(x: u32, y: u32, size: u32) -> Frame {
    frame_with_block(320, 240, x, y, size, SKIN)
}

/// White square on black, large enough for the shape phase
pub fn square_frame() -> Frame {
    frame_with_block(400, 300, 150, 100, 100, Rgb([255, 255, 255]))
}

/// Binary mask with a filled square
pub fn square_mask(width: u32, height: u32, x: u32, y: u32, size: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |px, py| {
        let inside = px >= x && px < x + size && py >= y && py < y + size;
        Luma([if inside { 255 } else { 0 }])
    })
}

/// Landmarks with exactly `raised` fingers up: index, middle, ring, pinky, then thumb
pub fn hand_with_fingers(raised: u8) -> LandmarkSet {
    let mut points = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
    let fingers = [
        (INDEX_TIP, INDEX_PIP),
        (MIDDLE_TIP, MIDDLE_PIP),
        (RING_TIP, RING_PIP),
        (PINKY_TIP, PINKY_PIP),
    ];
    for (i, (tip, pip)) in fingers.into_iter().enumerate() {
        points[pip] = Landmark::new(0.5, 0.5);
        points[tip] = Landmark::new(0.5, if (i as u8) < raised { 0.3 } else { 0.7 });
    }
    points[THUMB_IP] = Landmark::new(0.5, 0.5);
    points[THUMB_TIP] = Landmark::new(if raised >= 5 { 0.4 } else { 0.6 }, 0.5);
    LandmarkSet::new(points)
}

/// Detector whose visible finger count is set by the test between frames
#[derive(Clone, Default)]
pub struct ScriptedHands {
    pub fingers: Rc<Cell<Option<u8>>>,
}

impl ScriptedHands {
    pub fn show(&self, fingers: Option<u8>) {
        self.fingers.set(fingers);
    }
}

impl LandmarkDetector for ScriptedHands {
    fn detect(&mut self, _frame: &Frame) -> anyhow::Result<Vec<LandmarkSet>> {
        Ok(self.fingers.get().map(hand_with_fingers).into_iter().collect())
    }
}

/// Detector that always errors
pub struct BrokenDetector;

impl LandmarkDetector for BrokenDetector {
    fn detect(&mut self, _frame: &Frame) -> anyhow::Result<Vec<LandmarkSet>> {
        anyhow::bail!("model unavailable")
    }
}

/// Session driven by a shared manual clock and scripted hands
pub fn scripted_session() -> (Session<Rc<ManualClock>>, ScriptedHands, Rc<ManualClock>) {
    let hands = ScriptedHands::default();
    let clock = Rc::new(ManualClock::new());
    let session = Session::with_clock(Config::default(), Box::new(hands.clone()), clock.clone());
    (session, hands, clock)
}

/// Hold a finger count in front of the session for `millis`, one frame per step
pub fn hold_gesture(
    session: &mut Session<Rc<ManualClock>>,
    hands: &ScriptedHands,
    clock: &ManualClock,
    fingers: Option<u8>,
    millis: u64,
) -> anyhow::Result<()> {
    hands.show(fingers);
    let frames = millis / FRAME_STEP.as_millis() as u64;
    for _ in 0..frames {
        session.process(blank_frame(320, 240))?;
        clock.advance(FRAME_STEP);
    }
    Ok(())
}

use super::landmarks::{
    INDEX_PIP, INDEX_TIP, LandmarkSet, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP, THUMB_IP, THUMB_TIP,
};

const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Number of raised fingers, 0 to 5.
///
/// Assumes a mirrored frame: the thumb is up when its tip lies left of the IP
/// joint. Other fingers are up when the tip is above the PIP joint.
pub fn count_fingers(hand: &LandmarkSet) -> u8 {
    let mut raised = 0;
    if hand.get(THUMB_TIP).x < hand.get(THUMB_IP).x {
        raised += 1;
    }
    for (tip, pip) in FINGERS {
        if hand.get(tip).y < hand.get(pip).y {
            raised += 1;
        }
    }
    raised
}

mod common;

use std::time::Duration;

use airdraw::auth::{GestureSequenceMatcher, SequenceEvent, StabilityTimer};
use airdraw::config::GestureConfig;
use common::*;

/// Feed `value` every 100 ms for `millis`, starting at `*now`
fn hold(matcher: &mut GestureSequenceMatcher, now: &mut Duration, value: Option<u8>, millis: u64) -> Vec<SequenceEvent> {
    let mut events = Vec::new();
    for _ in 0..millis / 100 {
        let event = matcher.observe(value, *now);
        if event != SequenceEvent::Unchanged {
            events.push(event);
        }
        *now += FRAME_STEP;
    }
    events
}

fn enter(matcher: &mut GestureSequenceMatcher, now: &mut Duration, values: &[u8]) -> Vec<SequenceEvent> {
    values.iter().flat_map(|&v| hold(matcher, now, Some(v), 1500)).collect()
}

#[test]
fn test_counts_each_finger_combination() {
    for raised in 0..=5 {
        assert_eq!(count_fingers(&hand_with_fingers(raised)), raised);
    }
}

#[test]
fn test_thumb_uses_mirrored_horizontal_rule() {
    let mut hand = hand_with_fingers(0);
    hand.points[4] = Landmark::new(0.45, 0.5);
    assert_eq!(count_fingers(&hand), 1);
    hand.points[4] = Landmark::new(0.55, 0.5);
    assert_eq!(count_fingers(&hand), 0);
}

#[test]
fn test_full_sequence_completes_once() {
    let mut matcher = GestureSequenceMatcher::default();
    let mut now = Duration::ZERO;

    let events = enter(&mut matcher, &mut now, &[3, 2, 1, 5]);
    assert_eq!(
        events,
        vec![
            SequenceEvent::Progress(1),
            SequenceEvent::Progress(2),
            SequenceEvent::Progress(3),
            SequenceEvent::Complete,
        ]
    );
    assert!(matcher.sequence().is_empty());

    // Holding the final gesture does not complete again.
    assert!(hold(&mut matcher, &mut now, Some(5), 5000).iter().all(|e| *e != SequenceEvent::Complete));
}

#[test]
fn test_prefix_does_not_complete() {
    let mut matcher = GestureSequenceMatcher::default();
    let mut now = Duration::ZERO;

    let events = enter(&mut matcher, &mut now, &[3, 2, 1]);
    assert!(!events.contains(&SequenceEvent::Complete));
    assert_eq!(matcher.sequence(), &[3, 2, 1]);
}

#[test]
fn test_wrong_last_gesture_resets() {
    let mut matcher = GestureSequenceMatcher::default();
    let mut now = Duration::ZERO;

    let events = enter(&mut matcher, &mut now, &[3, 2, 1, 4]);
    assert_eq!(events.last(), Some(&SequenceEvent::Reset));
    assert!(!events.contains(&SequenceEvent::Complete));
    assert!(matcher.sequence().is_empty());
}

#[test]
fn test_mismatch_at_any_position_clears() {
    for k in 0..3 {
        let mut matcher = GestureSequenceMatcher::default();
        let mut now = Duration::ZERO;
        let mut attempt = [3u8, 2, 1, 5][..=k].to_vec();
        attempt[k] = 4;

        let events = enter(&mut matcher, &mut now, &attempt);
        assert_eq!(events.last(), Some(&SequenceEvent::Reset), "position {}", k);
        assert!(matcher.sequence().is_empty());
    }
}

#[test]
fn test_sequence_can_be_retried_after_reset() {
    let mut matcher = GestureSequenceMatcher::default();
    let mut now = Duration::ZERO;

    enter(&mut matcher, &mut now, &[3, 4]);
    assert!(matcher.sequence().is_empty());

    let events = enter(&mut matcher, &mut now, &[3, 2, 1, 5]);
    assert_eq!(events.last(), Some(&SequenceEvent::Complete));
}

#[test]
fn test_held_gesture_is_counted_once() {
    let mut matcher = GestureSequenceMatcher::default();
    let mut now = Duration::ZERO;

    let events = hold(&mut matcher, &mut now, Some(3), 6000);
    assert_eq!(events, vec![SequenceEvent::Progress(1)]);
    assert_eq!(matcher.sequence(), &[3]);
}

#[test]
fn test_short_hold_is_not_accepted() {
    let mut matcher = GestureSequenceMatcher::default();
    let mut now = Duration::ZERO;

    assert!(hold(&mut matcher, &mut now, Some(3), 900).is_empty());
    assert!(hold(&mut matcher, &mut now, Some(2), 900).is_empty());
    assert!(matcher.sequence().is_empty());
}

#[test]
fn test_flicker_restarts_stability_window() {
    let mut matcher = GestureSequenceMatcher::default();
    let mut now = Duration::ZERO;

    hold(&mut matcher, &mut now, Some(3), 600);
    hold(&mut matcher, &mut now, Some(4), 100);
    assert!(hold(&mut matcher, &mut now, Some(3), 900).is_empty());
    assert!(matcher.sequence().is_empty());
}

#[test]
fn test_missing_hand_changes_nothing() {
    let mut matcher = GestureSequenceMatcher::default();
    let mut now = Duration::ZERO;

    enter(&mut matcher, &mut now, &[3, 2]);
    assert!(hold(&mut matcher, &mut now, None, 5000).is_empty());
    assert_eq!(matcher.sequence(), &[3, 2]);
}

#[test]
fn test_cooldown_delays_next_acceptance() {
    let config = GestureConfig::default();
    let mut timer = StabilityTimer::default();
    let start = Duration::ZERO;

    assert!(!timer.observe(3, start, config.stability));
    assert!(timer.observe(3, start + config.stability, config.stability));

    let accepted_at = start + config.stability;
    timer.restart_at(accepted_at + config.cooldown);
    assert!(!timer.observe(3, accepted_at + Duration::from_secs(2), config.stability));
    assert!(timer.observe(3, accepted_at + config.cooldown + config.stability, config.stability));
}

#[test]
fn test_progress_text() {
    let mut matcher = GestureSequenceMatcher::default();
    let mut now = Duration::ZERO;
    assert_eq!(matcher.progress_text(), "Waiting for start...");

    enter(&mut matcher, &mut now, &[3, 2]);
    assert_eq!(matcher.progress_text(), "Sequence: 3 - 2");
}

mod common;

use airdraw::config::TrajectoryConfig;
use airdraw::models::RED;
use airdraw::tracking::{HandTracker, MotionPredictor, TrajectoryBuffer};
use common::*;

#[test]
fn test_no_prediction_before_first_measurement() {
    let mut predictor = MotionPredictor::default();
    assert_eq!(predictor.step(None), None);
    assert!(!predictor.is_initialized());
    assert_eq!(predictor.predict(), None);
    assert!(!predictor.correct(1.0, 1.0));
}

#[test]
fn test_first_measurement_seeds_state() {
    let mut predictor = MotionPredictor::default();
    assert_eq!(predictor.step(Some(Point::new(40, 25))), Some(Point::new(40, 25)));

    let estimate = predictor.estimate().unwrap();
    assert_eq!(estimate.position(), (40.0, 25.0));
    assert_eq!(estimate.velocity(), (0.0, 0.0));
}

#[test]
fn test_prediction_follows_constant_velocity() {
    let mut predictor = MotionPredictor::default();
    let xs: Vec<i32> = [10, 12, 14, 16, 18]
        .iter()
        .map(|&x| predictor.step(Some(Point::new(x, 10))).unwrap().x)
        .collect();

    // Velocity is unknown on the second frame, then picked up.
    assert!(xs[1] >= xs[0]);
    for pair in xs[1..].windows(2) {
        assert!(pair[1] > pair[0], "predictions {:?}", xs);
    }
    assert!(predictor.estimate().unwrap().velocity().0 > 0.0);
}

#[test]
fn test_missing_measurement_extrapolates() {
    let mut predictor = MotionPredictor::default();
    let mut last = 0;
    for x in [10, 12, 14, 16] {
        last = predictor.step(Some(Point::new(x, 10))).unwrap().x;
    }
    let coasted = predictor.step(None).expect("prediction without measurement");
    assert!(coasted.x > last);
    assert_eq!(coasted.y, 10);
}

#[test]
fn test_covariance_stays_symmetric() {
    let mut predictor = MotionPredictor::default();
    let measurements = [Some((5, 5)), Some((9, 4)), None, Some((15, 7)), None, None, Some((30, 2))];
    for m in measurements {
        predictor.step(m.map(|(x, y)| Point::new(x, y)));
        let p = &predictor.estimate().unwrap().covariance;
        for i in 0..4 {
            assert!(p[(i, i)] >= 0.0);
            for j in 0..4 {
                assert!((p[(i, j)] - p[(j, i)]).abs() < 1e-4);
            }
        }
    }
}

#[test]
fn test_trajectory_is_bounded() {
    let mut trail = TrajectoryBuffer::new(TrajectoryConfig::default().capacity);
    for i in 0..450 {
        trail.push(if i % 7 == 0 { None } else { Some(Point::new(i, i)) });
        assert!(trail.len() <= 200);
    }
    assert_eq!(trail.len(), 200);
    assert_eq!(trail.latest(), Some(Point::new(449, 449)));
}

#[test]
fn test_trajectory_evicts_oldest() {
    let mut trail = TrajectoryBuffer::new(3);
    for i in 0..5 {
        trail.push(Some(Point::new(i, 0)));
    }
    let xs: Vec<i32> = trail.iter().map(|p| p.unwrap().x).collect();
    assert_eq!(xs, vec![4, 3, 2]);
}

#[test]
fn test_gap_breaks_the_line() {
    let mut trail = TrajectoryBuffer::new(10);
    trail.push(Some(Point::new(10, 10)));
    trail.push(Some(Point::new(50, 10)));
    trail.push(None);
    trail.push(Some(Point::new(50, 50)));
    trail.push(Some(Point::new(10, 50)));

    assert_eq!(trail.segments().count(), 2);

    let mut frame = blank_frame(64, 64);
    trail.render(&mut frame, RED, 1);
    assert_eq!(*frame.get_pixel(30, 10), RED);
    assert_eq!(*frame.get_pixel(30, 50), RED);
    // Nothing joins (50, 10) to (50, 50) across the gap.
    assert_eq!(frame.get_pixel(50, 30).0, [0, 0, 0]);
}

#[test]
fn test_tracker_records_gap_until_hand_seen() {
    let mut tracker = HandTracker::new(&Config::default());

    let step = tracker.process(blank_frame(320, 240));
    assert_eq!(step.measurement, None);
    assert_eq!(step.prediction, None);
    assert_eq!(tracker.trajectory().iter().next(), Some(&None));

    let step = tracker.process(skin_frame(120, 80, 80));
    assert!(step.measurement.is_some());
    assert_eq!(step.prediction, step.measurement);
    assert_eq!(tracker.trajectory().len(), 2);
    assert!(tracker.predictor().is_initialized());
}

#[test]
fn test_tracker_follows_moving_hand() {
    let mut tracker = HandTracker::new(&Config::default());
    let mut predictions = Vec::new();
    for i in 0..6 {
        let step = tracker.process(skin_frame(40 + i * 20, 80, 80));
        predictions.push(step.prediction.unwrap().x);
    }
    assert!(predictions.last() > predictions.first(), "{:?}", predictions);
    assert_eq!(tracker.trajectory().segments().count(), 5);
}

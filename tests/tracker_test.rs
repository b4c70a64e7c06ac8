//! Tests for orientation and location tracking

use motion_playback::{
    command::PlaybackCommand,
    location::{LocationSample, LocationTracker},
    orientation::{Axis, Direction, OrientationEvent, OrientationSample, OrientationTracker},
};

/// Test the single tilt scenario from a resting device
#[test]
fn test_tilt_emits_single_volume_up() {
    let mut tracker = OrientationTracker::new(0.0174);

    let samples = [OrientationSample::new(0.0, 0.0), OrientationSample::new(0.02, 0.0)];
    let events: Vec<OrientationEvent> = samples.into_iter().flat_map(|s| tracker.observe(s)).collect();

    assert_eq!(events, vec![OrientationEvent::new(Axis::Pitch, Direction::Increase)]);
    assert_eq!(PlaybackCommand::from(events[0]), PlaybackCommand::VolumeUp);
}

/// Test the yaw sign convention end to end
#[test]
fn test_turn_direction_maps_to_seek() {
    let mut tracker = OrientationTracker::new(0.0174);
    tracker.observe(OrientationSample::new(0.0, 0.0));

    let increase = tracker.observe(OrientationSample::new(0.0, 0.1));
    assert_eq!(PlaybackCommand::from(increase[0]), PlaybackCommand::SeekBackward);

    let decrease = tracker.observe(OrientationSample::new(0.0, 0.0));
    assert_eq!(PlaybackCommand::from(decrease[0]), PlaybackCommand::SeekForward);
}

/// Test that slow rotation never triggers, however far it goes
#[test]
fn test_slow_rotation_never_triggers() {
    let mut tracker = OrientationTracker::new(0.0174);
    let mut pitch = 0.0;
    for _ in 0..500 {
        assert!(tracker.observe(OrientationSample::new(pitch, -pitch)).is_empty());
        pitch += 0.01;
    }
    // The device is now ~5 rad away from where it started
    assert!(pitch > 4.9);
}

/// Test that every sample moves the comparison point, events or not
#[test]
fn test_previous_sample_always_updates() {
    let mut tracker = OrientationTracker::new(0.05);
    tracker.observe(OrientationSample::new(0.0, 0.0));
    tracker.observe(OrientationSample::new(0.03, 0.0));
    assert_eq!(tracker.last_sample(), Some(OrientationSample::new(0.03, 0.0)));

    // 0.06 from the seed but only 0.03 from the previous sample
    assert!(tracker.observe(OrientationSample::new(0.06, 0.0)).is_empty());
}

/// Test the first location fix never triggers, wherever it is
#[test]
fn test_first_location_never_triggers() {
    for (lat, lon) in [(0.0, 0.0), (89.9, 179.9), (-45.0, -120.0)] {
        let mut tracker = LocationTracker::new(10.0);
        assert!(tracker.observe(LocationSample::new(lat, lon)).is_none());
    }
}

/// Test the rolling reference with sub-threshold drift
#[test]
fn test_location_drift_scenario() {
    let mut tracker = LocationTracker::new(10.0);
    let origin = LocationSample::new(0.0, 0.0);
    let nearby = LocationSample::new(0.0, 0.00005);
    let further = LocationSample::new(0.0, 0.0001);

    assert!(tracker.observe(origin).is_none());

    // ~5.5 m, reference stays put
    assert!(tracker.observe(nearby).is_none());
    assert_eq!(tracker.reference(), Some(origin));

    // ~11 m from the original reference
    let event = tracker.observe(further).expect("displacement");
    assert!((event.distance_m - 11.12).abs() < 0.05);
    assert_eq!(tracker.reference(), Some(further));

    // Back at ~5.5 m from the new reference, nothing fires
    assert!(tracker.observe(nearby).is_none());
    assert_eq!(PlaybackCommand::from(event), PlaybackCommand::Restart);
}

/// Test that successive moves each roll the reference forward
#[test]
fn test_reference_rolls_forward() {
    let mut tracker = LocationTracker::new(10.0);
    tracker.observe(LocationSample::new(10.0, 10.0));

    let mut fired = 0;
    for step in 1..=5 {
        let sample = LocationSample::new(10.0 + f64::from(step) * 0.0002, 10.0);
        if tracker.observe(sample).is_some() {
            fired += 1;
        }
        assert_eq!(tracker.reference(), Some(sample));
    }
    assert_eq!(fired, 5);
}

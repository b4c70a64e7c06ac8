//! Error handling tests for all modules

use motion_playback::{
    config::{Config, EXAMPLE_CONFIG},
    error::Error,
    location::{LocationSample, LocationTracker},
    orientation::{OrientationSample, OrientationTracker},
    replay::{replay, Trace},
};

#[test]
fn test_config_parse_errors() {
    let result = Config::from_yaml("orientation: [not, a, map]");
    match result {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("Failed to parse config")),
        _ => panic!("Expected ConfigError"),
    }

    let result = Config::from_file("/nonexistent/motion-playback.yaml");
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_config_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let mut config = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
    config.playback.volume_step = 0.25;
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded, config);
    loaded.validate().unwrap();
}

#[test]
fn test_config_validation_messages() {
    let mut config = Config::default();
    config.orientation.update_interval_ms = 0;
    match config.validate() {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("update interval")),
        _ => panic!("Expected ConfigError"),
    }

    let mut config = Config::default();
    config.playback.volume_step = 0.0;
    match config.validate() {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("Volume step")),
        _ => panic!("Expected ConfigError"),
    }
}

#[test]
fn test_trace_errors() {
    assert!(matches!(Trace::from_yaml("steps: 12"), Err(Error::TraceError(_))));
    assert!(matches!(Trace::from_file("/nonexistent/trace.yaml"), Err(Error::IoError(_))));

    let trace = Trace::from_yaml("steps:\n  - advance_secs: -3.0\n").unwrap();
    assert!(matches!(replay(&trace, &Config::default()), Err(Error::TraceError(_))));

    let mut config = Config::default();
    config.playback.seek_step_secs = f64::NAN;
    let trace = Trace::from_yaml("steps: []").unwrap();
    assert!(matches!(replay(&trace, &config), Err(Error::ConfigError(_))));
}

#[test]
fn test_malformed_samples_are_dropped() {
    let mut tracker = OrientationTracker::new(0.0174);
    let samples = [
        OrientationSample::new(f64::NAN, 0.0),
        OrientationSample::new(0.0, f64::INFINITY),
        OrientationSample::new(f64::NEG_INFINITY, f64::NAN),
    ];
    for sample in samples {
        assert!(tracker.observe(sample).is_empty());
    }
    assert!(tracker.last_sample().is_none());

    let mut tracker = LocationTracker::new(10.0);
    tracker.observe(LocationSample::new(0.0, 0.0));
    for sample in [
        LocationSample::new(f64::NAN, 0.0),
        LocationSample::new(0.0, 181.0),
        LocationSample::new(-90.5, 0.0),
    ] {
        assert!(tracker.observe(sample).is_none());
    }
    assert_eq!(tracker.reference(), Some(LocationSample::new(0.0, 0.0)));
}

#[test]
#[should_panic(expected = "Distance threshold must be positive")]
fn test_zero_distance_threshold() {
    let _ = LocationTracker::new(0.0);
}

//! Constants used throughout the engine

use std::time::Duration;

/// One degree in radians, the default rotation threshold
pub const DEFAULT_ROTATION_THRESHOLD: f64 = std::f64::consts::PI / 180.0;

/// Orientation sensor update interval (~50 Hz)
pub const DEFAULT_ORIENTATION_INTERVAL: Duration = Duration::from_millis(20);

/// Displacement in meters that triggers a restart
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 10.0;

/// Distance filter hint handed to the location source, in meters
pub const DEFAULT_DISTANCE_FILTER: f64 = 10.0;

/// Volume change per tilt step
pub const DEFAULT_VOLUME_STEP: f32 = 0.1;

/// Seek offset per turn step
pub const DEFAULT_SEEK_STEP: Duration = Duration::from_secs(5);

/// Volume applied when a session starts
pub const DEFAULT_INITIAL_VOLUME: f32 = 0.5;

/// Volume bounds
pub const VOLUME_MIN: f32 = 0.0;
pub const VOLUME_MAX: f32 = 1.0;

/// Mean Earth radius used for great-circle distances, in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

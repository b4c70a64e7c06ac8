//! Configuration management for the motion playback engine

use crate::constants::{
    DEFAULT_DISTANCE_FILTER, DEFAULT_DISTANCE_THRESHOLD, DEFAULT_INITIAL_VOLUME, DEFAULT_ORIENTATION_INTERVAL,
    DEFAULT_ROTATION_THRESHOLD, DEFAULT_SEEK_STEP, DEFAULT_VOLUME_STEP,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tilt and turn gestures
    pub orientation: OrientationConfig,

    /// Restart-on-move gesture
    pub location: LocationConfig,

    /// Shake gesture
    pub shake: ShakeConfig,

    /// Playback defaults
    pub playback: PlaybackConfig,
}

/// Orientation tracking parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// Enable tilt/turn control
    pub enabled: bool,

    /// Minimum angular change between samples, in radians
    pub rotation_threshold: f64,

    /// Sensor update interval in milliseconds
    pub update_interval_ms: u64,
}

/// Location tracking parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Enable restart-on-move
    pub enabled: bool,

    /// Displacement that triggers a restart, in meters
    pub distance_threshold_m: f64,

    /// Distance filter hint passed to the location source, in meters
    pub distance_filter_m: f64,
}

/// Shake parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// Enable shake to toggle playback
    pub enabled: bool,
}

/// Playback parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Start playing as soon as the session starts
    pub autoplay: bool,

    /// Volume applied at session start (0.0-1.0)
    pub initial_volume: f32,

    /// Volume change per tilt step
    pub volume_step: f32,

    /// Seek offset per turn step, in seconds
    pub seek_step_secs: f64,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rotation_threshold: DEFAULT_ROTATION_THRESHOLD,
            update_interval_ms: u64::try_from(DEFAULT_ORIENTATION_INTERVAL.as_millis()).unwrap_or(20),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            distance_threshold_m: DEFAULT_DISTANCE_THRESHOLD,
            distance_filter_m: DEFAULT_DISTANCE_FILTER,
        }
    }
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            initial_volume: DEFAULT_INITIAL_VOLUME,
            volume_step: DEFAULT_VOLUME_STEP,
            seek_step_secs: DEFAULT_SEEK_STEP.as_secs_f64(),
        }
    }
}

impl OrientationConfig {
    /// Update interval as a duration
    #[must_use]
    pub const fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

impl PlaybackConfig {
    /// Seek step as a duration, falling back to the default when out of range
    #[must_use]
    pub fn seek_step(&self) -> Duration {
        Duration::try_from_secs_f64(self.seek_step_secs).unwrap_or(DEFAULT_SEEK_STEP)
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Validate thresholds
        if !(self.orientation.rotation_threshold.is_finite() && self.orientation.rotation_threshold > 0.0) {
            return Err(Error::ConfigError("Rotation threshold must be positive".to_string()));
        }
        if self.orientation.update_interval_ms == 0 {
            return Err(Error::ConfigError(
                "Orientation update interval must be greater than 0".to_string(),
            ));
        }
        if !(self.location.distance_threshold_m.is_finite() && self.location.distance_threshold_m > 0.0) {
            return Err(Error::ConfigError("Distance threshold must be positive".to_string()));
        }
        if !(self.location.distance_filter_m.is_finite() && self.location.distance_filter_m >= 0.0) {
            return Err(Error::ConfigError("Distance filter must be non-negative".to_string()));
        }

        // Validate playback settings
        if !(0.0..=1.0).contains(&self.playback.initial_volume) {
            return Err(Error::ConfigError(
                "Initial volume must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(self.playback.volume_step > 0.0 && self.playback.volume_step <= 1.0) {
            return Err(Error::ConfigError("Volume step must be in (0.0, 1.0]".to_string()));
        }
        if !(self.playback.seek_step_secs.is_finite() && self.playback.seek_step_secs > 0.0) {
            return Err(Error::ConfigError("Seek step must be positive".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Motion Playback Configuration

# Tilt (volume) and turn (seek)
orientation:
  enabled: true
  rotation_threshold: 0.0174533
  update_interval_ms: 20

# Restart when the device moves
location:
  enabled: true
  distance_threshold_m: 10.0
  distance_filter_m: 10.0

# Shake to play/pause
shake:
  enabled: true

# Playback defaults
playback:
  autoplay: true
  initial_volume: 0.5
  volume_step: 0.1
  seek_step_secs: 5.0
"#;

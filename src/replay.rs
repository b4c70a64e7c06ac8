//! Scripted sensor traces.
//!
//! A trace is a YAML list of sensor readings, player status reports and
//! direct commands. Replaying it runs the same trackers and dispatcher a live
//! session uses, on the calling thread, against a [`SimulatedPlayer`].

use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::command::PlaybackCommand;
use crate::config::Config;
use crate::dispatcher::CommandDispatcher;
use crate::error::{Error, Result};
use crate::location::{LocationSample, LocationTracker};
use crate::orientation::{OrientationSample, OrientationTracker};
use crate::playback_state::PlaybackState;
use crate::player::{Player, PlayerCall, PlayerStatus, SimulatedPlayer};
use crate::shake::ShakeDetector;

/// One scripted input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Orientation sensor tick
    Orientation(OrientationSample),
    /// Location fix
    Location(LocationSample),
    /// Shake notification
    Shake,
    /// Player status report
    Status(PlayerStatus),
    /// Direct control
    Command(PlaybackCommand),
    /// Let media play for this many seconds
    AdvanceSecs(f64),
}

/// A scripted session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Media length in seconds
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,

    /// Inputs in delivery order
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

const fn default_duration_secs() -> f64 {
    600.0
}

impl Trace {
    /// Load a trace from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse a trace from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::TraceError(format!("Failed to parse trace: {e}")))
    }

    fn duration(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.duration_secs)
            .map_err(|e| Error::TraceError(format!("Invalid duration {}: {e}", self.duration_secs)))
    }
}

/// Outcome of a replay
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    /// Player calls in the order they were made
    pub calls: Vec<PlayerCall>,
    /// Requested state after the last step
    pub state: PlaybackState,
    /// Playhead after the last step
    pub position: Duration,
    /// Tilt/turn events emitted
    pub orientation_events: usize,
    /// Displacement events emitted
    pub displacement_events: usize,
    /// Shake events emitted
    pub shake_events: usize,
}

/// Run a trace through the engine
///
/// # Errors
///
/// Returns `Error::ConfigError` for an invalid configuration and
/// `Error::TraceError` for an invalid trace.
pub fn replay(trace: &Trace, config: &Config) -> Result<ReplayReport> {
    config.validate()?;

    let player = SimulatedPlayer::new(trace.duration()?);
    let dispatcher = CommandDispatcher::new(player.clone(), &config.playback);
    let mut orientation_tracker = OrientationTracker::new(config.orientation.rotation_threshold);
    let mut location_tracker = LocationTracker::new(config.location.distance_threshold_m);
    let shake_detector = ShakeDetector::new();

    let mut orientation_events = 0;
    let mut displacement_events = 0;
    let mut shake_events = 0;

    if config.playback.autoplay {
        dispatcher.apply(PlaybackCommand::Play);
    }

    info!("Replaying {} steps", trace.steps.len());
    for (index, step) in trace.steps.iter().enumerate() {
        debug!("Step {}: {:?}", index, step);
        match step {
            Step::Orientation(sample) if config.orientation.enabled => {
                for event in orientation_tracker.observe(*sample) {
                    orientation_events += 1;
                    dispatcher.handle_orientation(event);
                }
            }
            Step::Location(sample) if config.location.enabled => {
                if let Some(event) = location_tracker.observe(*sample) {
                    displacement_events += 1;
                    dispatcher.handle_displacement(event);
                }
            }
            Step::Shake if config.shake.enabled => {
                shake_events += 1;
                dispatcher.handle_shake(shake_detector.on_shake());
            }
            Step::Orientation(_) | Step::Location(_) | Step::Shake => {
                debug!("Step {} skipped, feature disabled", index);
            }
            Step::Status(status) => dispatcher.observe_status(*status),
            Step::Command(command) => dispatcher.apply(*command),
            Step::AdvanceSecs(secs) => {
                let by = Duration::try_from_secs_f64(*secs)
                    .map_err(|e| Error::TraceError(format!("Step {index}: invalid advance {secs}: {e}")))?;
                player.set_position(player.current_position().saturating_add(by));
            }
        }
    }

    Ok(ReplayReport {
        calls: player.calls(),
        state: dispatcher.state(),
        position: player.current_position(),
        orientation_events,
        displacement_events,
        shake_events,
    })
}

/// Trace used when none is given on the command line
pub const DEMO_TRACE: &str = r#"# Tilt up twice, turn, walk away, shake
duration_secs: 300
steps:
  - orientation: { pitch: 0.0, yaw: 0.0 }
  - orientation: { pitch: 0.02, yaw: 0.0 }
  - orientation: { pitch: 0.04, yaw: 0.0 }
  - advance_secs: 60
  - orientation: { pitch: 0.04, yaw: -0.03 }
  - location: { latitude: 48.8566, longitude: 2.3522 }
  - location: { latitude: 48.85665, longitude: 2.3522 }
  - location: { latitude: 48.8568, longitude: 2.3522 }
  - shake
  - status: paused
  - shake
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_trace_parses() {
        let trace = Trace::from_yaml(DEMO_TRACE).unwrap();
        assert_eq!(trace.steps.len(), 11);
        assert_eq!(trace.steps[8], Step::Shake);
        assert_eq!(trace.steps[9], Step::Status(PlayerStatus::Paused));
    }

    #[test]
    fn test_demo_trace_replays() {
        let trace = Trace::from_yaml(DEMO_TRACE).unwrap();
        let report = replay(&trace, &Config::default()).unwrap();

        assert_eq!(report.orientation_events, 3);
        assert_eq!(report.displacement_events, 1);
        assert_eq!(report.shake_events, 2);
        assert!((report.state.volume() - 0.7).abs() < 1e-6);
        assert!(report.state.is_playing());
        assert_eq!(report.position, Duration::ZERO);
    }

    #[test]
    fn test_disabled_feature_skipped() {
        let trace = Trace::from_yaml("steps:\n  - shake\n").unwrap();
        let mut config = Config::default();
        config.shake.enabled = false;
        config.playback.autoplay = false;
        let report = replay(&trace, &config).unwrap();
        assert_eq!(report.shake_events, 0);
        assert!(!report.state.is_playing());
    }

    #[test]
    fn test_command_step() {
        let trace = Trace::from_yaml("steps:\n  - command: volume_down\n  - command:\n      set_volume: 0.9\n").unwrap();
        let report = replay(&trace, &Config::default()).unwrap();
        assert!((report.state.volume() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_duration() {
        let trace = Trace {
            duration_secs: -1.0,
            steps: Vec::new(),
        };
        assert!(matches!(replay(&trace, &Config::default()), Err(Error::TraceError(_))));
    }
}

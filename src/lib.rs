//! Motion-controlled media playback.
//!
//! This library turns handheld device motion into playback commands:
//! - tilting (pitch) raises or lowers the volume
//! - turning (yaw) seeks forward or backward
//! - moving the device a meaningful distance restarts playback
//! - shaking toggles play/pause
//!
//! The pipeline for every sensor is:
//! 1. A tracker compares each raw sample with its previous state
//! 2. Crossing a fixed threshold emits a discrete event
//! 3. The dispatcher maps the event to one command
//! 4. The command updates the playback state and drives the player
//!
//! # Examples
//!
//! ## Orientation Tracking
//!
//! ```
//! use motion_playback::orientation::{Axis, Direction, OrientationSample, OrientationTracker};
//!
//! let mut tracker = OrientationTracker::new(0.0174);
//!
//! // The first sample only seeds the tracker
//! assert!(tracker.observe(OrientationSample::new(0.0, 0.0)).is_empty());
//!
//! // Tilting by more than the threshold emits a pitch event
//! let events = tracker.observe(OrientationSample::new(0.02, 0.0));
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].axis, Axis::Pitch);
//! assert_eq!(events[0].direction, Direction::Increase);
//! ```
//!
//! ## Driving a Player
//!
//! ```
//! use motion_playback::{
//!     config::PlaybackConfig,
//!     dispatcher::CommandDispatcher,
//!     orientation::{Axis, Direction, OrientationEvent},
//!     player::SimulatedPlayer,
//!     shake::ShakeEvent,
//! };
//! use std::time::Duration;
//!
//! let player = SimulatedPlayer::new(Duration::from_secs(180));
//! let dispatcher = CommandDispatcher::new(player.clone(), &PlaybackConfig::default());
//!
//! dispatcher.handle_orientation(OrientationEvent::new(Axis::Pitch, Direction::Increase));
//! assert!((dispatcher.state().volume() - 0.6).abs() < 1e-6);
//!
//! dispatcher.handle_shake(ShakeEvent);
//! assert!(dispatcher.state().is_playing());
//! ```
//!
//! ## Live Session
//!
//! ```
//! use motion_playback::{
//!     config::Config,
//!     player::SimulatedPlayer,
//!     session::{PlaybackSession, SensorSources},
//!     sources::{ChannelLocationSource, ChannelOrientationSource, ChannelShakeSource},
//! };
//! use std::time::Duration;
//!
//! # fn main() -> motion_playback::Result<()> {
//! let (orientation, orientation_feed) = ChannelOrientationSource::new();
//! let (location, _location_feed) = ChannelLocationSource::new();
//! let (shake, shake_feed) = ChannelShakeSource::new();
//!
//! let mut session = PlaybackSession::new(
//!     Config::default(),
//!     SimulatedPlayer::new(Duration::from_secs(180)),
//!     SensorSources {
//!         orientation: Box::new(orientation),
//!         location: Box::new(location),
//!         shake: Box::new(shake),
//!     },
//! )?;
//!
//! session.start()?;
//! orientation_feed.push(motion_playback::orientation::OrientationSample::new(0.0, 0.0));
//! shake_feed.shake();
//! session.stop();
//! # Ok(())
//! # }
//! ```

/// Requested play/pause state and clamped volume
pub mod playback_state;

/// Pitch/yaw threshold tracking
pub mod orientation;

/// Displacement tracking against a rolling reference location
pub mod location;

/// Shake adapter and session-scoped shake bus
pub mod shake;

/// Playback commands and the event mapping
pub mod command;

/// Player collaborator interface
pub mod player;

/// Sensor source collaborators
pub mod sources;

/// Serialized command application
pub mod dispatcher;

/// Session lifecycle and the reactor thread
pub mod session;

/// Scripted trace replay
pub mod replay;

/// Error types and result handling
pub mod error;

/// Constants used throughout the engine
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};

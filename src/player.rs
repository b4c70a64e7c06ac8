//! Player collaborator interface and an in-memory player.
//!
//! The engine drives any [`Player`]; decoding and rendering live behind it.
//! [`SimulatedPlayer`] records every call and keeps a position within the
//! media duration, which is what the CLI harness and tests run against.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::debug;

use crate::error::{Error, Result};

/// Actual playback status reported by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    /// Media is playing
    Playing,
    /// Media is paused
    Paused,
    /// Playback requested, waiting for data
    Buffering,
}

/// Media player driven by the dispatcher.
///
/// Commands are fire-and-forget; an `Err` is logged by the caller and never
/// retried. Seek targets past the end are the player's to clamp.
pub trait Player: Send {
    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Jump to an absolute position
    fn seek(&mut self, to: Duration) -> Result<()>;

    /// Current playback position
    fn current_position(&self) -> Duration;

    /// Apply a volume in `[0, 1]`
    fn set_volume(&mut self, volume: f32) -> Result<()>;
}

/// One call received by a [`SimulatedPlayer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCall {
    /// `play()`
    Play,
    /// `pause()`
    Pause,
    /// `seek(to)` with the clamped target
    Seek(Duration),
    /// `set_volume(volume)`
    SetVolume(f32),
}

#[derive(Debug)]
struct SimulatedState {
    duration: Duration,
    position: Duration,
    status: PlayerStatus,
    volume: f32,
    offline: bool,
    calls: Vec<PlayerCall>,
}

/// In-memory player; clones share the same state
#[derive(Debug, Clone)]
pub struct SimulatedPlayer {
    state: Arc<Mutex<SimulatedState>>,
}

impl SimulatedPlayer {
    /// Create a paused player for media of the given length
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(SimulatedState {
                duration,
                position: Duration::ZERO,
                status: PlayerStatus::Paused,
                volume: 1.0,
                offline: false,
                calls: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimulatedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_online(state: &SimulatedState) -> Result<()> {
        if state.offline {
            Err(Error::Player("player is offline".to_string()))
        } else {
            Ok(())
        }
    }

    /// Media length
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.lock().duration
    }

    /// Reported status
    #[must_use]
    pub fn status(&self) -> PlayerStatus {
        self.lock().status
    }

    /// Last applied volume
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.lock().volume
    }

    /// Every call received so far
    #[must_use]
    pub fn calls(&self) -> Vec<PlayerCall> {
        self.lock().calls.clone()
    }

    /// Drain the call log
    pub fn take_calls(&self) -> Vec<PlayerCall> {
        std::mem::take(&mut self.lock().calls)
    }

    /// Move the playhead as if media had played, clamped to the duration
    pub fn set_position(&self, position: Duration) {
        let mut state = self.lock();
        state.position = position.min(state.duration);
    }

    /// Force a status, e.g. to simulate buffering stalls
    pub fn set_status(&self, status: PlayerStatus) {
        self.lock().status = status;
    }

    /// Make every command fail until switched back
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }
}

impl Player for SimulatedPlayer {
    fn play(&mut self) -> Result<()> {
        let mut state = self.lock();
        Self::check_online(&state)?;
        state.status = PlayerStatus::Playing;
        state.calls.push(PlayerCall::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let mut state = self.lock();
        Self::check_online(&state)?;
        state.status = PlayerStatus::Paused;
        state.calls.push(PlayerCall::Pause);
        Ok(())
    }

    fn seek(&mut self, to: Duration) -> Result<()> {
        let mut state = self.lock();
        Self::check_online(&state)?;
        let target = to.min(state.duration);
        debug!("Seeking to {:?}", target);
        state.position = target;
        state.calls.push(PlayerCall::Seek(target));
        Ok(())
    }

    fn current_position(&self) -> Duration {
        self.lock().position
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        let mut state = self.lock();
        Self::check_online(&state)?;
        state.volume = volume;
        state.calls.push(PlayerCall::SetVolume(volume));
        Ok(())
    }
}

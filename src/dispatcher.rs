//! Serialized application of playback commands.
//!
//! Every gesture event and direct control ends up in [`CommandDispatcher::apply`],
//! which holds one lock over the playback state and the player for the whole
//! command. Concurrent callers therefore never interleave a read-modify-write.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};

use crate::command::PlaybackCommand;
use crate::config::PlaybackConfig;
use crate::error::Result;
use crate::location::DisplacementEvent;
use crate::orientation::OrientationEvent;
use crate::playback_state::PlaybackState;
use crate::player::{Player, PlayerStatus};
use crate::shake::ShakeEvent;

struct Inner<P> {
    state: PlaybackState,
    player: P,
}

/// Maps gesture events to commands and applies them to the player
pub struct CommandDispatcher<P: Player> {
    inner: Mutex<Inner<P>>,
    volume_step: f32,
    seek_step: Duration,
}

impl<P: Player> CommandDispatcher<P> {
    /// Create a dispatcher and push the initial volume to the player
    pub fn new(player: P, config: &PlaybackConfig) -> Self {
        let dispatcher = Self {
            inner: Mutex::new(Inner {
                state: PlaybackState::new(config.initial_volume),
                player,
            }),
            volume_step: config.volume_step,
            seek_step: config.seek_step(),
        };
        {
            let mut inner = dispatcher.lock();
            let volume = inner.state.volume();
            log_failure("set_volume", inner.player.set_volume(volume));
        }
        dispatcher
    }

    fn lock(&self) -> MutexGuard<'_, Inner<P>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the requested playback state
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.lock().state
    }

    /// Tilt or turn gesture
    pub fn handle_orientation(&self, event: OrientationEvent) {
        self.apply(event.into());
    }

    /// The device moved past the distance threshold
    pub fn handle_displacement(&self, event: DisplacementEvent) {
        info!("Moved {:.1} m, restarting playback", event.distance_m);
        self.apply(event.into());
    }

    /// The device was shaken
    pub fn handle_shake(&self, event: ShakeEvent) {
        self.apply(event.into());
    }

    /// Reconcile play intent with a status reported by the player.
    ///
    /// The latest observation always wins over the last issued command.
    pub fn observe_status(&self, status: PlayerStatus) {
        let mut inner = self.lock();
        let was_playing = inner.state.is_playing();
        inner.state.observe_status(status);
        if was_playing != inner.state.is_playing() {
            debug!("Player reported {:?}, play intent now {}", status, inner.state.is_playing());
        }
    }

    /// Apply one command to the state and the player
    pub fn apply(&self, command: PlaybackCommand) {
        debug!("Applying {}", command.name());
        let mut inner = self.lock();
        let Inner { state, player } = &mut *inner;

        match command {
            PlaybackCommand::Play => Self::play(state, player),
            PlaybackCommand::Pause => Self::pause(state, player),
            PlaybackCommand::TogglePlayback => {
                if state.is_playing() {
                    Self::pause(state, player);
                } else {
                    Self::play(state, player);
                }
            }
            PlaybackCommand::VolumeUp => {
                let volume = state.adjust_volume(self.volume_step);
                log_failure("set_volume", player.set_volume(volume));
            }
            PlaybackCommand::VolumeDown => {
                let volume = state.adjust_volume(-self.volume_step);
                log_failure("set_volume", player.set_volume(volume));
            }
            PlaybackCommand::SetVolume(requested) => {
                let volume = state.set_volume(requested);
                log_failure("set_volume", player.set_volume(volume));
            }
            PlaybackCommand::SeekForward => {
                let target = player.current_position().saturating_add(self.seek_step);
                log_failure("seek", player.seek(target));
            }
            PlaybackCommand::SeekBackward => {
                let target = player.current_position().saturating_sub(self.seek_step);
                log_failure("seek", player.seek(target));
            }
            PlaybackCommand::Restart => {
                log_failure("pause", player.pause());
                log_failure("seek", player.seek(Duration::ZERO));
                Self::play(state, player);
            }
        }
    }

    fn play(state: &mut PlaybackState, player: &mut P) {
        state.set_playing(true);
        log_failure("play", player.play());
    }

    fn pause(state: &mut PlaybackState, player: &mut P) {
        state.set_playing(false);
        log_failure("pause", player.pause());
    }
}

fn log_failure(operation: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!("Player {} failed: {}", operation, e);
    }
}

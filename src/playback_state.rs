//! Requested playback state: play intent and clamped volume.

use crate::constants::{VOLUME_MAX, VOLUME_MIN};
use crate::player::PlayerStatus;

/// Play/pause intent plus the volume the engine owns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    is_playing: bool,
    volume: f32,
}

impl PlaybackState {
    /// Create a paused state with the given volume (clamped)
    #[must_use]
    pub fn new(volume: f32) -> Self {
        let mut state = Self {
            is_playing: false,
            volume: VOLUME_MIN,
        };
        state.set_volume(volume);
        state
    }

    /// Current play intent
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Current volume, always within `[0, 1]`
    #[must_use]
    pub const fn volume(&self) -> f32 {
        self.volume
    }

    /// Set the volume, clamping to `[0, 1]`. Non-finite values are ignored.
    ///
    /// Returns the volume now in effect.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        if volume.is_finite() {
            self.volume = volume.clamp(VOLUME_MIN, VOLUME_MAX);
        }
        self.volume
    }

    /// Shift the volume by `delta`, clamping the result
    pub fn adjust_volume(&mut self, delta: f32) -> f32 {
        self.set_volume(self.volume + delta)
    }

    /// Record the play intent
    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    /// Flip the play intent and return the new value
    pub fn toggle(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        self.is_playing
    }

    /// Reconcile intent with an observed player status.
    ///
    /// Buffering counts as playing: the player holds a play request and is waiting for data.
    pub fn observe_status(&mut self, status: PlayerStatus) {
        self.is_playing = match status {
            PlayerStatus::Playing | PlayerStatus::Buffering => true,
            PlayerStatus::Paused => false,
        };
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_INITIAL_VOLUME)
    }
}

//! Playback commands and the gesture-to-command mapping.

use crate::location::DisplacementEvent;
use crate::orientation::{Axis, Direction, OrientationEvent};
use crate::shake::ShakeEvent;

/// Command applied by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackCommand {
    /// Start or resume playback
    Play,
    /// Pause playback
    Pause,
    /// Pause when playing, play when paused
    TogglePlayback,
    /// Raise volume by one step
    VolumeUp,
    /// Lower volume by one step
    VolumeDown,
    /// Set an absolute volume (clamped)
    SetVolume(f32),
    /// Jump ahead by one seek step
    SeekForward,
    /// Jump back by one seek step
    SeekBackward,
    /// Pause, rewind to the start and play
    Restart,
}

impl PlaybackCommand {
    /// Short name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::TogglePlayback => "toggle_playback",
            Self::VolumeUp => "volume_up",
            Self::VolumeDown => "volume_down",
            Self::SetVolume(_) => "set_volume",
            Self::SeekForward => "seek_forward",
            Self::SeekBackward => "seek_backward",
            Self::Restart => "restart",
        }
    }
}

// Increasing yaw seeks backward. Keep this sign convention end to end.
impl From<OrientationEvent> for PlaybackCommand {
    fn from(event: OrientationEvent) -> Self {
        match (event.axis, event.direction) {
            (Axis::Pitch, Direction::Increase) => Self::VolumeUp,
            (Axis::Pitch, Direction::Decrease) => Self::VolumeDown,
            (Axis::Yaw, Direction::Increase) => Self::SeekBackward,
            (Axis::Yaw, Direction::Decrease) => Self::SeekForward,
        }
    }
}

impl From<DisplacementEvent> for PlaybackCommand {
    fn from(_: DisplacementEvent) -> Self {
        Self::Restart
    }
}

impl From<ShakeEvent> for PlaybackCommand {
    fn from(_: ShakeEvent) -> Self {
        Self::TogglePlayback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_mapping() {
        let cases = [
            (Axis::Pitch, Direction::Increase, PlaybackCommand::VolumeUp),
            (Axis::Pitch, Direction::Decrease, PlaybackCommand::VolumeDown),
            (Axis::Yaw, Direction::Increase, PlaybackCommand::SeekBackward),
            (Axis::Yaw, Direction::Decrease, PlaybackCommand::SeekForward),
        ];
        for (axis, direction, expected) in cases {
            assert_eq!(PlaybackCommand::from(OrientationEvent::new(axis, direction)), expected);
        }
    }

    #[test]
    fn test_shake_maps_to_toggle() {
        assert_eq!(PlaybackCommand::from(ShakeEvent), PlaybackCommand::TogglePlayback);
    }
}

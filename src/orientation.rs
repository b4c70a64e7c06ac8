//! Orientation tracking for tilt and turn gestures.
//!
//! Each pitch/yaw sample is compared with the one immediately before it. When
//! the change on an axis reaches the rotation threshold, a discrete event is
//! emitted for that axis. Sub-threshold drift is never accumulated.

use log::debug;

use crate::constants::DEFAULT_ROTATION_THRESHOLD;

/// One orientation reading, angles in radians
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrientationSample {
    /// Rotation around the lateral axis
    pub pitch: f64,
    /// Rotation around the vertical axis
    pub yaw: f64,
}

impl OrientationSample {
    /// Create a new sample
    #[must_use]
    pub const fn new(pitch: f64, yaw: f64) -> Self {
        Self { pitch, yaw }
    }

    /// Both angles are finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.pitch.is_finite() && self.yaw.is_finite()
    }
}

/// Rotation axis an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Tilt forward/backward
    Pitch,
    /// Turn left/right
    Yaw,
}

/// Sign of the angular change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Angle grew by at least the threshold
    Increase,
    /// Angle shrank by at least the threshold
    Decrease,
}

/// Discrete tilt (pitch) or turn (yaw) event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientationEvent {
    /// Axis that moved
    pub axis: Axis,
    /// Which way it moved
    pub direction: Direction,
}

impl OrientationEvent {
    /// Create a new event
    #[must_use]
    pub const fn new(axis: Axis, direction: Direction) -> Self {
        Self { axis, direction }
    }
}

/// Classify the change between two consecutive readings on one axis
#[must_use]
pub fn axis_direction(previous: f64, current: f64, threshold: f64) -> Option<Direction> {
    let delta = current - previous;
    if delta >= threshold {
        Some(Direction::Increase)
    } else if -delta >= threshold {
        Some(Direction::Decrease)
    } else {
        None
    }
}

/// Threshold detector over consecutive pitch/yaw samples
#[derive(Debug, Clone)]
pub struct OrientationTracker {
    rotation_threshold: f64,
    last_pitch: Option<f64>,
    last_yaw: Option<f64>,
}

impl OrientationTracker {
    /// Create a tracker with the given threshold in radians
    #[must_use]
    pub fn new(rotation_threshold: f64) -> Self {
        assert!(
            rotation_threshold.is_finite() && rotation_threshold > 0.0,
            "Rotation threshold must be positive"
        );
        Self {
            rotation_threshold,
            last_pitch: None,
            last_yaw: None,
        }
    }

    /// Threshold in radians
    #[must_use]
    pub const fn rotation_threshold(&self) -> f64 {
        self.rotation_threshold
    }

    /// Last sample seen, if any
    #[must_use]
    pub fn last_sample(&self) -> Option<OrientationSample> {
        match (self.last_pitch, self.last_yaw) {
            (Some(pitch), Some(yaw)) => Some(OrientationSample::new(pitch, yaw)),
            _ => None,
        }
    }

    /// Feed a sample and collect the events it triggers.
    ///
    /// Pitch is evaluated before yaw, so a sample firing on both axes yields
    /// the pitch event first. Non-finite samples are dropped without touching
    /// the tracker state.
    pub fn observe(&mut self, sample: OrientationSample) -> Vec<OrientationEvent> {
        if !sample.is_finite() {
            debug!("Dropping malformed orientation sample {:?}", sample);
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);

        if let Some(last) = self.last_pitch {
            if let Some(direction) = axis_direction(last, sample.pitch, self.rotation_threshold) {
                events.push(OrientationEvent::new(Axis::Pitch, direction));
            }
        }
        if let Some(last) = self.last_yaw {
            if let Some(direction) = axis_direction(last, sample.yaw, self.rotation_threshold) {
                events.push(OrientationEvent::new(Axis::Yaw, direction));
            }
        }

        self.last_pitch = Some(sample.pitch);
        self.last_yaw = Some(sample.yaw);

        events
    }

    /// Forget the previous sample; the next one seeds the tracker again
    pub fn reset(&mut self) {
        self.last_pitch = None;
        self.last_yaw = None;
    }
}

impl Default for OrientationTracker {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATION_THRESHOLD)
    }
}

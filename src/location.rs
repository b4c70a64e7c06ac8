//! Location tracking for the restart-on-move gesture.
//!
//! The first fix becomes the reference point. A later fix at least the
//! distance threshold away from the reference emits a [`DisplacementEvent`]
//! and becomes the new reference. Closer fixes leave the reference alone, so
//! slow drift away from it eventually triggers.

use log::debug;

use crate::constants::{DEFAULT_DISTANCE_THRESHOLD, EARTH_RADIUS_METERS};

/// Geodesic position fix, in degrees
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LocationSample {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl LocationSample {
    /// Create a new fix
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Coordinates are finite and within geographic bounds
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance in meters (haversine)
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();

        EARTH_RADIUS_METERS * c
    }
}

/// The device moved far enough from the reference point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacementEvent {
    /// Reference the distance was measured from
    pub from: LocationSample,
    /// Fix that crossed the threshold, now the reference
    pub to: LocationSample,
    /// Distance between the two, in meters
    pub distance_m: f64,
}

/// Rolling-reference displacement detector
#[derive(Debug, Clone)]
pub struct LocationTracker {
    distance_threshold: f64,
    reference: Option<LocationSample>,
}

impl LocationTracker {
    /// Create a tracker with the given threshold in meters
    #[must_use]
    pub fn new(distance_threshold: f64) -> Self {
        assert!(
            distance_threshold.is_finite() && distance_threshold > 0.0,
            "Distance threshold must be positive"
        );
        Self {
            distance_threshold,
            reference: None,
        }
    }

    /// Threshold in meters
    #[must_use]
    pub const fn distance_threshold(&self) -> f64 {
        self.distance_threshold
    }

    /// Current reference point
    #[must_use]
    pub const fn reference(&self) -> Option<LocationSample> {
        self.reference
    }

    /// Feed a fix and report a displacement if it crossed the threshold
    pub fn observe(&mut self, sample: LocationSample) -> Option<DisplacementEvent> {
        if !sample.is_valid() {
            debug!("Dropping malformed location sample {:?}", sample);
            return None;
        }

        let Some(reference) = self.reference else {
            debug!("Seeding reference location {:?}", sample);
            self.reference = Some(sample);
            return None;
        };

        let distance_m = reference.distance_to(&sample);
        if distance_m >= self.distance_threshold {
            self.reference = Some(sample);
            Some(DisplacementEvent {
                from: reference,
                to: sample,
                distance_m,
            })
        } else {
            None
        }
    }

    /// Forget the reference; the next fix seeds it again
    pub fn reset(&mut self) {
        self.reference = None;
    }
}

impl Default for LocationTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE_THRESHOLD)
    }
}

//! Sensor source collaborators.
//!
//! The platform owns the actual sensor subscriptions. A session only asks a
//! source to start delivering into a channel and to stop again. The channel
//! backed sources here are driven by hand through a feed handle, which is how
//! platform glue code and tests push samples in.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crossbeam_channel::Sender;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::location::LocationSample;
use crate::orientation::OrientationSample;
use crate::shake::ShakeSignal;

/// Push-based pitch/yaw sensor
pub trait OrientationSource: Send {
    /// Begin delivering samples every `update_interval`
    ///
    /// # Errors
    ///
    /// `Error::SensorUnavailable` when the device has no orientation hardware
    fn start(&mut self, update_interval: Duration, sink: Sender<OrientationSample>) -> Result<()>;

    /// Stop delivering; no sample is sent once this returns. Safe when not started.
    fn stop(&mut self);
}

/// Push-based location sensor
pub trait LocationSource: Send {
    /// Ask for "while in use" access
    ///
    /// # Errors
    ///
    /// `Error::AuthorizationDenied` when access is refused
    fn request_authorization(&mut self) -> Result<()>;

    /// Begin delivering fixes; `distance_filter_m` is only a hint
    fn start(&mut self, distance_filter_m: f64, sink: Sender<LocationSample>) -> Result<()>;

    /// Stop delivering; no fix is sent once this returns. Safe when not started.
    fn stop(&mut self);
}

/// Discrete shake notifications
pub trait ShakeSource: Send {
    /// Begin publishing shakes on `signal`
    fn start(&mut self, signal: ShakeSignal) -> Result<()>;

    /// Stop publishing; no shake is sent once this returns. Safe when not started.
    fn stop(&mut self);
}

type Slot<T> = Arc<Mutex<Option<T>>>;

fn lock_slot<T>(slot: &Mutex<Option<T>>) -> MutexGuard<'_, Option<T>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Hand-driven producer for a channel backed source
#[derive(Debug)]
pub struct SampleFeed<T> {
    slot: Slot<Sender<T>>,
}

impl<T> Clone for SampleFeed<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> SampleFeed<T> {
    /// Deliver one sample. Returns `false` when the source is not started.
    pub fn push(&self, sample: T) -> bool {
        lock_slot(&self.slot)
            .as_ref()
            .is_some_and(|sender| sender.send(sample).is_ok())
    }

    /// The source is currently started
    #[must_use]
    pub fn is_active(&self) -> bool {
        lock_slot(&self.slot).is_some()
    }
}

/// Orientation source fed through a [`SampleFeed`]
#[derive(Debug)]
pub struct ChannelOrientationSource {
    slot: Slot<Sender<OrientationSample>>,
    available: bool,
}

impl ChannelOrientationSource {
    /// Create a working source and its feed
    #[must_use]
    pub fn new() -> (Self, SampleFeed<OrientationSample>) {
        Self::with_availability(true)
    }

    /// Create a source for a device without orientation hardware
    #[must_use]
    pub fn unavailable() -> (Self, SampleFeed<OrientationSample>) {
        Self::with_availability(false)
    }

    fn with_availability(available: bool) -> (Self, SampleFeed<OrientationSample>) {
        let slot = Arc::new(Mutex::new(None));
        let feed = SampleFeed {
            slot: Arc::clone(&slot),
        };
        (Self { slot, available }, feed)
    }
}

impl OrientationSource for ChannelOrientationSource {
    fn start(&mut self, update_interval: Duration, sink: Sender<OrientationSample>) -> Result<()> {
        if !self.available {
            return Err(Error::SensorUnavailable("no orientation hardware".to_string()));
        }
        info!("Orientation updates every {:?}", update_interval);
        *lock_slot(&self.slot) = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if lock_slot(&self.slot).take().is_some() {
            debug!("Orientation updates stopped");
        }
    }
}

/// Location source fed through a [`SampleFeed`]
#[derive(Debug)]
pub struct ChannelLocationSource {
    slot: Slot<Sender<LocationSample>>,
    authorized: bool,
}

impl ChannelLocationSource {
    /// Create an authorized source and its feed
    #[must_use]
    pub fn new() -> (Self, SampleFeed<LocationSample>) {
        Self::with_authorization(true)
    }

    /// Create a source whose authorization request is refused
    #[must_use]
    pub fn denied() -> (Self, SampleFeed<LocationSample>) {
        Self::with_authorization(false)
    }

    fn with_authorization(authorized: bool) -> (Self, SampleFeed<LocationSample>) {
        let slot = Arc::new(Mutex::new(None));
        let feed = SampleFeed {
            slot: Arc::clone(&slot),
        };
        (Self { slot, authorized }, feed)
    }
}

impl LocationSource for ChannelLocationSource {
    fn request_authorization(&mut self) -> Result<()> {
        if self.authorized {
            Ok(())
        } else {
            Err(Error::AuthorizationDenied("location access refused".to_string()))
        }
    }

    fn start(&mut self, distance_filter_m: f64, sink: Sender<LocationSample>) -> Result<()> {
        if !self.authorized {
            return Err(Error::AuthorizationDenied("location access refused".to_string()));
        }
        info!("Location updates with {:.1} m distance filter", distance_filter_m);
        *lock_slot(&self.slot) = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if lock_slot(&self.slot).take().is_some() {
            debug!("Location updates stopped");
        }
    }
}

/// Hand-driven trigger for a [`ChannelShakeSource`]
#[derive(Debug, Clone)]
pub struct ShakeFeed {
    slot: Slot<ShakeSignal>,
}

impl ShakeFeed {
    /// Report one shake. Returns `false` when the source is not started.
    pub fn shake(&self) -> bool {
        lock_slot(&self.slot).as_ref().is_some_and(ShakeSignal::notify)
    }
}

/// Shake source fed through a [`ShakeFeed`]
#[derive(Debug)]
pub struct ChannelShakeSource {
    slot: Slot<ShakeSignal>,
}

impl ChannelShakeSource {
    /// Create a source and its trigger
    #[must_use]
    pub fn new() -> (Self, ShakeFeed) {
        let slot = Arc::new(Mutex::new(None));
        let feed = ShakeFeed {
            slot: Arc::clone(&slot),
        };
        (Self { slot }, feed)
    }
}

impl ShakeSource for ChannelShakeSource {
    fn start(&mut self, signal: ShakeSignal) -> Result<()> {
        *lock_slot(&self.slot) = Some(signal);
        Ok(())
    }

    fn stop(&mut self) {
        if lock_slot(&self.slot).take().is_some() {
            debug!("Shake notifications stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shake::ShakeBus;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_feed_inactive_until_started() {
        let (mut source, feed) = ChannelOrientationSource::new();
        assert!(!feed.push(OrientationSample::new(0.0, 0.0)));

        let (tx, rx) = unbounded();
        source.start(Duration::from_millis(20), tx).unwrap();
        assert!(feed.push(OrientationSample::new(0.1, 0.2)));
        assert_eq!(rx.try_recv().unwrap(), OrientationSample::new(0.1, 0.2));

        source.stop();
        assert!(!feed.is_active());
        assert!(!feed.push(OrientationSample::new(0.3, 0.4)));
    }

    #[test]
    fn test_unavailable_orientation() {
        let (mut source, _feed) = ChannelOrientationSource::unavailable();
        let (tx, _rx) = unbounded();
        let err = source.start(Duration::from_millis(20), tx).unwrap_err();
        assert!(matches!(err, Error::SensorUnavailable(_)));
    }

    #[test]
    fn test_denied_location() {
        let (mut source, _feed) = ChannelLocationSource::denied();
        assert!(matches!(source.request_authorization(), Err(Error::AuthorizationDenied(_))));
    }

    #[test]
    fn test_shake_feed_publishes_on_bus() {
        let (mut source, feed) = ChannelShakeSource::new();
        let bus = ShakeBus::new();
        source.start(bus.signal()).unwrap();
        let receiver = bus.into_receiver();

        assert!(feed.shake());
        assert_eq!(receiver.try_iter().count(), 1);

        source.stop();
        assert!(!feed.shake());
    }
}

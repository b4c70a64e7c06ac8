//! Shake gesture adapter and its session-scoped notification bus.

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;

/// The device was shaken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShakeEvent;

/// Turns platform shake notifications into [`ShakeEvent`]s.
///
/// Holds no state and performs no debouncing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShakeDetector;

impl ShakeDetector {
    /// Create a detector
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Handle one shake notification
    #[must_use]
    pub fn on_shake(&self) -> ShakeEvent {
        ShakeEvent
    }
}

/// Publisher half of the shake bus, handed to the platform shake source
#[derive(Debug, Clone)]
pub struct ShakeSignal {
    sender: Sender<()>,
}

impl ShakeSignal {
    /// Publish one shake notification.
    ///
    /// Returns `false` once the owning session has torn the bus down.
    pub fn notify(&self) -> bool {
        let delivered = self.sender.send(()).is_ok();
        if !delivered {
            debug!("Shake notification dropped, bus closed");
        }
        delivered
    }
}

/// Unit-payload channel connecting one shake source to one session
#[derive(Debug)]
pub struct ShakeBus {
    sender: Sender<()>,
    receiver: Receiver<()>,
}

impl ShakeBus {
    /// Create an empty bus
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// New publisher handle
    #[must_use]
    pub fn signal(&self) -> ShakeSignal {
        ShakeSignal {
            sender: self.sender.clone(),
        }
    }

    /// Split into the receiving end, dropping the bus's own publisher
    #[must_use]
    pub fn into_receiver(self) -> Receiver<()> {
        self.receiver
    }
}

impl Default for ShakeBus {
    fn default() -> Self {
        Self::new()
    }
}

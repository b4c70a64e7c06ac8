//! Playback session: sensor subscriptions plus the reactor thread.
//!
//! `start` subscribes the three sensor sources, each into its own channel, and
//! spawns one reactor thread. The reactor owns the trackers, so their state
//! is never shared. Events it produces go to the dispatcher, which callers can
//! also reach directly for on-screen controls.
//!
//! `stop` stops every source, tells the reactor to shut down and joins it.
//! The reactor applies whatever was already queued before it exits, and
//! nothing reaches the dispatcher once `stop` returns.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, never, select, unbounded, Receiver, Sender};
use log::{debug, info, warn};

use crate::command::PlaybackCommand;
use crate::config::Config;
use crate::dispatcher::CommandDispatcher;
use crate::error::{Error, Result};
use crate::location::{LocationSample, LocationTracker};
use crate::orientation::{OrientationSample, OrientationTracker};
use crate::player::{Player, PlayerStatus};
use crate::shake::{ShakeBus, ShakeDetector};
use crate::sources::{LocationSource, OrientationSource, ShakeSource};

/// The platform sensor collaborators for one session
pub struct SensorSources {
    /// Pitch/yaw source
    pub orientation: Box<dyn OrientationSource>,
    /// Location fix source
    pub location: Box<dyn LocationSource>,
    /// Shake notification source
    pub shake: Box<dyn ShakeSource>,
}

/// Which gesture features are live in a started session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCapabilities {
    /// Tilt/turn control is active
    pub orientation: bool,
    /// Restart-on-move is active
    pub location: bool,
    /// Shake toggle is active
    pub shake: bool,
}

struct Running {
    shutdown: Sender<()>,
    reactor: JoinHandle<()>,
}

/// One playback session driven by device motion
pub struct PlaybackSession<P: Player + 'static> {
    config: Config,
    dispatcher: Arc<CommandDispatcher<P>>,
    sources: SensorSources,
    status_tx: Sender<PlayerStatus>,
    status_rx: Receiver<PlayerStatus>,
    capabilities: SessionCapabilities,
    running: Option<Running>,
}

impl<P: Player + 'static> PlaybackSession<P> {
    /// Create a stopped session
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` when the configuration does not validate
    pub fn new(config: Config, player: P, sources: SensorSources) -> Result<Self> {
        config.validate()?;
        let dispatcher = Arc::new(CommandDispatcher::new(player, &config.playback));
        let (status_tx, status_rx) = unbounded();

        Ok(Self {
            config,
            dispatcher,
            sources,
            status_tx,
            status_rx,
            capabilities: SessionCapabilities::default(),
            running: None,
        })
    }

    /// Dispatcher for direct playback controls
    #[must_use]
    pub const fn dispatcher(&self) -> &Arc<CommandDispatcher<P>> {
        &self.dispatcher
    }

    /// Channel the player pushes its status observations into
    #[must_use]
    pub fn status_sender(&self) -> Sender<PlayerStatus> {
        self.status_tx.clone()
    }

    /// Features that came up on the last `start`
    #[must_use]
    pub const fn capabilities(&self) -> SessionCapabilities {
        self.capabilities
    }

    /// Whether the reactor is running
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Subscribe all sensors and start reacting to them.
    ///
    /// A sensor that is missing or refused only disables its own feature.
    /// Calling this on a running session does nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` when the reactor thread cannot be spawned; every
    /// source is stopped again before returning.
    pub fn start(&mut self) -> Result<SessionCapabilities> {
        if self.running.is_some() {
            debug!("Session already running");
            return Ok(self.capabilities);
        }

        let (orientation_tx, orientation_rx) = unbounded();
        let (location_tx, location_rx) = unbounded();
        let shake_bus = ShakeBus::new();

        let orientation = self.config.orientation.enabled
            && enable(
                "Orientation control",
                self.sources
                    .orientation
                    .start(self.config.orientation.update_interval(), orientation_tx),
            );
        let location_source = &mut self.sources.location;
        let distance_filter = self.config.location.distance_filter_m;
        let location = self.config.location.enabled
            && enable(
                "Restart on move",
                location_source
                    .request_authorization()
                    .and_then(|()| location_source.start(distance_filter, location_tx)),
            );
        let shake = self.config.shake.enabled
            && enable("Shake toggle", self.sources.shake.start(shake_bus.signal()));

        let (shutdown_tx, shutdown_rx) = bounded(1);
        let reactor = Reactor {
            dispatcher: Arc::clone(&self.dispatcher),
            orientation_tracker: OrientationTracker::new(self.config.orientation.rotation_threshold),
            location_tracker: LocationTracker::new(self.config.location.distance_threshold_m),
            shake_detector: ShakeDetector::new(),
            orientation_rx: if orientation { orientation_rx } else { never() },
            location_rx: if location { location_rx } else { never() },
            shake_rx: if shake { shake_bus.into_receiver() } else { never() },
            status_rx: self.status_rx.clone(),
            shutdown_rx,
        };

        let handle = match thread::Builder::new()
            .name("motion-playback-reactor".to_string())
            .spawn(move || reactor.run())
        {
            Ok(handle) => handle,
            Err(e) => {
                self.stop_sources();
                return Err(Error::Io(e));
            }
        };

        self.running = Some(Running {
            shutdown: shutdown_tx,
            reactor: handle,
        });
        self.capabilities = SessionCapabilities {
            orientation,
            location,
            shake,
        };
        info!("Session started with {:?}", self.capabilities);

        if self.config.playback.autoplay {
            self.dispatcher.apply(PlaybackCommand::Play);
        }

        Ok(self.capabilities)
    }

    /// Tear down all subscriptions and the reactor.
    ///
    /// Safe to call on a session that was never started or already stopped.
    pub fn stop(&mut self) {
        self.stop_sources();

        if let Some(running) = self.running.take() {
            // The reactor may already be gone if it panicked; join reports that.
            let _ = running.shutdown.send(());
            if running.reactor.join().is_err() {
                warn!("Session reactor panicked");
            }
            info!("Session stopped");
        }

        self.capabilities = SessionCapabilities::default();
    }

    fn stop_sources(&mut self) {
        self.sources.orientation.stop();
        self.sources.location.stop();
        self.sources.shake.stop();
    }
}

impl<P: Player + 'static> Drop for PlaybackSession<P> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn enable(feature: &str, result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) if e.is_degraded_mode() => {
            warn!("{} disabled: {}", feature, e);
            false
        }
        Err(e) => {
            warn!("{} failed to start: {}", feature, e);
            false
        }
    }
}

enum Message {
    Orientation(OrientationSample),
    Location(LocationSample),
    Shake,
    Status(PlayerStatus),
    Closed(Feed),
    Shutdown,
}

#[derive(Debug, Clone, Copy)]
enum Feed {
    Orientation,
    Location,
    Shake,
    Status,
}

struct Reactor<P: Player> {
    dispatcher: Arc<CommandDispatcher<P>>,
    orientation_tracker: OrientationTracker,
    location_tracker: LocationTracker,
    shake_detector: ShakeDetector,
    orientation_rx: Receiver<OrientationSample>,
    location_rx: Receiver<LocationSample>,
    shake_rx: Receiver<()>,
    status_rx: Receiver<PlayerStatus>,
    shutdown_rx: Receiver<()>,
}

impl<P: Player> Reactor<P> {
    fn run(mut self) {
        debug!("Reactor running");
        loop {
            let message = select! {
                recv(self.shutdown_rx) -> _ => Message::Shutdown,
                recv(self.orientation_rx) -> msg => msg.map_or(Message::Closed(Feed::Orientation), Message::Orientation),
                recv(self.location_rx) -> msg => msg.map_or(Message::Closed(Feed::Location), Message::Location),
                recv(self.shake_rx) -> msg => msg.map_or(Message::Closed(Feed::Shake), |()| Message::Shake),
                recv(self.status_rx) -> msg => msg.map_or(Message::Closed(Feed::Status), Message::Status),
            };

            match message {
                Message::Shutdown => {
                    self.drain();
                    break;
                }
                Message::Closed(feed) => {
                    debug!("{:?} feed closed", feed);
                    match feed {
                        Feed::Orientation => self.orientation_rx = never(),
                        Feed::Location => self.location_rx = never(),
                        Feed::Shake => self.shake_rx = never(),
                        Feed::Status => self.status_rx = never(),
                    }
                }
                other => self.handle(other),
            }
        }
        debug!("Reactor exited");
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::Orientation(sample) => {
                for event in self.orientation_tracker.observe(sample) {
                    self.dispatcher.handle_orientation(event);
                }
            }
            Message::Location(sample) => {
                if let Some(event) = self.location_tracker.observe(sample) {
                    self.dispatcher.handle_displacement(event);
                }
            }
            Message::Shake => self.dispatcher.handle_shake(self.shake_detector.on_shake()),
            Message::Status(status) => self.dispatcher.observe_status(status),
            Message::Closed(_) | Message::Shutdown => {}
        }
    }

    // Apply everything queued before shutdown so no delivered sample is lost.
    fn drain(&mut self) {
        let pending: Vec<Message> = self
            .orientation_rx
            .try_iter()
            .map(Message::Orientation)
            .chain(self.location_rx.try_iter().map(Message::Location))
            .chain(self.shake_rx.try_iter().map(|()| Message::Shake))
            .chain(self.status_rx.try_iter().map(Message::Status))
            .collect();
        for message in pending {
            self.handle(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayerCall, SimulatedPlayer};
    use crate::sources::{ChannelLocationSource, ChannelOrientationSource, ChannelShakeSource};
    use std::time::Duration;

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.playback.autoplay = false;
        config
    }

    #[test]
    fn test_stop_without_start() {
        let (orientation, _) = ChannelOrientationSource::new();
        let (location, _) = ChannelLocationSource::new();
        let (shake, _) = ChannelShakeSource::new();
        let mut session = PlaybackSession::new(
            quiet_config(),
            SimulatedPlayer::new(Duration::from_secs(60)),
            SensorSources {
                orientation: Box::new(orientation),
                location: Box::new(location),
                shake: Box::new(shake),
            },
        )
        .unwrap();

        session.stop();
        session.stop();
        assert!(!session.is_running());
    }

    #[test]
    fn test_shake_applied_before_stop_returns() {
        let player = SimulatedPlayer::new(Duration::from_secs(60));
        let (orientation, _) = ChannelOrientationSource::new();
        let (location, _) = ChannelLocationSource::new();
        let (shake, shake_feed) = ChannelShakeSource::new();
        let mut session = PlaybackSession::new(
            quiet_config(),
            player.clone(),
            SensorSources {
                orientation: Box::new(orientation),
                location: Box::new(location),
                shake: Box::new(shake),
            },
        )
        .unwrap();
        player.take_calls();

        session.start().unwrap();
        assert!(shake_feed.shake());
        session.stop();

        assert_eq!(player.calls(), vec![PlayerCall::Play]);
        assert!(!shake_feed.shake());
    }
}

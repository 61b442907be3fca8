//! Shared state of the tournament clock view

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    clock::{ClockSnapshot, TickReport, TimeSource, TournamentClock},
    services::WakeLock,
};

use super::{ClockIntent, DisplayState};

/// The one live clock instance plus everything the HTTP surface needs
pub struct AppState {
    /// Tournament session; the only writer of clock state
    pub clock: Arc<Mutex<TournamentClock>>,
    /// Wall clock sampled once per intent and per tick
    pub time: Arc<dyn TimeSource>,
    /// Presentation flags such as fullscreen
    pub display: Arc<Mutex<DisplayState>>,
    /// Display wake lock held while the view is up
    pub wake_lock: Arc<dyn WakeLock>,
    /// How often the ticker polls while running
    pub poll_interval: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Running flag, watched by the ticker to park while paused
    pub running_tx: watch::Sender<bool>,
    /// Latest snapshot for the presentation layer
    pub snapshot_tx: watch::Sender<ClockSnapshot>,
    /// Keep the receivers alive to prevent channel closure
    pub _running_rx: watch::Receiver<bool>,
    pub _snapshot_rx: watch::Receiver<ClockSnapshot>,
}

impl AppState {
    pub fn new(
        clock: TournamentClock,
        time: Arc<dyn TimeSource>,
        wake_lock: Arc<dyn WakeLock>,
        poll_interval: Duration,
        port: u16,
        host: String,
    ) -> Self {
        let snapshot = clock.snapshot(time.now());
        let (running_tx, running_rx) = watch::channel(clock.is_running());
        let (snapshot_tx, snapshot_rx) = watch::channel(snapshot);

        Self {
            clock: Arc::new(Mutex::new(clock)),
            time,
            display: Arc::new(Mutex::new(DisplayState::new())),
            wake_lock,
            poll_interval,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            running_tx,
            snapshot_tx,
            _running_rx: running_rx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Apply an operator intent and publish the resulting snapshot
    pub fn apply_intent(&self, intent: ClockIntent) -> Result<ClockSnapshot, String> {
        if intent == ClockIntent::ToggleFullscreen {
            let fullscreen = self.toggle_fullscreen()?;
            info!("Fullscreen requested: {}", fullscreen);
            self.record_action(intent);
            return self.latest_snapshot();
        }

        let mut clock = self.clock.lock()
            .map_err(|e| format!("Failed to lock clock: {}", e))?;
        let now = self.time.now();

        match intent {
            ClockIntent::ToggleStartPause => {
                clock.toggle_start_pause(now);
            }
            ClockIntent::StepPrevious => {
                if clock.step_previous(now).is_none() {
                    debug!("Already on the first level");
                }
            }
            ClockIntent::StepNext => {
                if clock.step_next(now).is_none() {
                    debug!("Already on the last level");
                }
            }
            ClockIntent::AddMinute => clock.add_minute(),
            ClockIntent::SubtractMinute => clock.subtract_minute(),
            ClockIntent::ToggleFullscreen => {}
        }

        // Publish under the lock so snapshots go out in mutation order
        let snapshot = clock.snapshot(now);
        self.publish(&snapshot);
        drop(clock);

        self.record_action(intent);
        Ok(snapshot)
    }

    /// One polling tick. Returns `None` while paused.
    pub fn tick(&self) -> Result<Option<TickReport>, String> {
        let mut clock = self.clock.lock()
            .map_err(|e| format!("Failed to lock clock: {}", e))?;
        let now = self.time.now();

        let report = clock.tick(now);
        let snapshot = clock.snapshot(now);
        self.publish(&snapshot);
        drop(clock);

        if let Some(report) = &report {
            if let Some(transition) = &report.transition {
                info!("Level transition: {:?}", transition);
            }
        }
        Ok(report)
    }

    fn publish(&self, snapshot: &ClockSnapshot) {
        self.running_tx.send_if_modified(|running| {
            let changed = *running != snapshot.running;
            *running = snapshot.running;
            changed
        });

        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to publish clock snapshot: {}", e);
        }
    }

    fn record_action(&self, intent: ClockIntent) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(intent.as_str().to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Flip the fullscreen request and return the new value
    pub fn toggle_fullscreen(&self) -> Result<bool, String> {
        self.display.lock()
            .map(|mut display| display.toggle_fullscreen())
            .map_err(|e| format!("Failed to lock display state: {}", e))
    }

    pub fn is_fullscreen(&self) -> Result<bool, String> {
        self.display.lock()
            .map(|display| display.fullscreen)
            .map_err(|e| format!("Failed to lock display state: {}", e))
    }

    /// Last snapshot published by an intent or a tick
    pub fn latest_snapshot(&self) -> Result<ClockSnapshot, String> {
        Ok(self.snapshot_tx.borrow().clone())
    }

    pub fn is_running(&self) -> bool {
        *self.running_tx.borrow()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("poll_interval", &self.poll_interval)
            .field("port", &self.port)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

//! Keeping the display awake while the clock is shown

use std::sync::Mutex;

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Platform mechanism preventing the display from sleeping
pub trait WakeLock: Send + Sync {
    fn acquire(&self);
    fn release(&self);
}

/// Used when no wake lock is wanted or available
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWakeLock;

impl WakeLock for NoopWakeLock {
    fn acquire(&self) {
        debug!("Wake lock disabled, nothing to acquire");
    }

    fn release(&self) {}
}

/// Holds a `systemd-inhibit` child for as long as the lock is held
#[derive(Debug, Default)]
pub struct SystemdInhibitLock {
    child: Mutex<Option<Child>>,
}

impl SystemdInhibitLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.child.lock().map(|c| c.is_some()).unwrap_or(false)
    }
}

impl WakeLock for SystemdInhibitLock {
    fn acquire(&self) {
        let Ok(mut child) = self.child.lock() else {
            warn!("Wake lock state poisoned, not acquiring");
            return;
        };
        if child.is_some() {
            return;
        }

        let spawned = Command::new("systemd-inhibit")
            .args([
                "--what=idle:sleep",
                "--who=tournament-clock",
                "--why=Tournament clock is on screen",
                "--mode=block",
                "sleep",
                "infinity",
            ])
            .kill_on_drop(true)
            .spawn();

        match spawned {
            Ok(process) => {
                info!("Wake lock acquired");
                *child = Some(process);
            }
            Err(e) => warn!("Failed to acquire wake lock: {}", e),
        }
    }

    fn release(&self) {
        let Ok(mut child) = self.child.lock() else {
            return;
        };
        if let Some(mut process) = child.take() {
            if let Err(e) = process.start_kill() {
                warn!("Failed to release wake lock: {}", e);
            } else {
                info!("Wake lock released");
            }
        }
    }
}

//! Wall-clock sources

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Supplies the current instant. Each tick or intent samples it once.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock for tests and simulations
#[derive(Debug)]
pub struct ManualTimeSource {
    now: Mutex<DateTime<Utc>>,
}

impl ManualTimeSource {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        if let Ok(mut now) = self.now.lock() {
            *now = instant;
        }
    }

    pub fn advance_ms(&self, ms: i64) {
        if let Ok(mut now) = self.now.lock() {
            *now += Duration::milliseconds(ms);
        }
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_source_advances() {
        let start = Utc::now();
        let source = ManualTimeSource::new(start);
        source.advance_ms(1_500);
        assert_eq!(source.now() - start, Duration::milliseconds(1_500));

        source.set(start);
        assert_eq!(source.now(), start);
    }
}

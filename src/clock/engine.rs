//! Authoritative countdown state machine
//!
//! While running the engine stores only the instant the level ends; while
//! paused it stores only the milliseconds left. Remaining time is always
//! recomputed from that basis and never decremented.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::levels::{BlindLevel, LevelSequence};

const MINUTE_MS: i64 = 60_000;

/// `instant` moved by `ms`, pinned to chrono's range instead of overflowing
fn offset_by_ms(instant: DateTime<Utc>, ms: i64) -> DateTime<Utc> {
    Duration::try_milliseconds(ms)
        .and_then(|delta| instant.checked_add_signed(delta))
        .unwrap_or(if ms < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// The single source of truth for elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBasis {
    /// Running: the level ends at this instant
    EndsAt(DateTime<Utc>),
    /// Paused: this many milliseconds are left; may be transiently negative
    Remaining(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    pub level_index: usize,
    pub basis: TimeBasis,
}

impl ClockState {
    pub fn is_running(&self) -> bool {
        matches!(self.basis, TimeBasis::EndsAt(_))
    }

    /// Unclamped milliseconds left at `now`
    pub fn raw_remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        match self.basis {
            TimeBasis::EndsAt(end) => (end - now).num_milliseconds(),
            TimeBasis::Remaining(ms) => ms,
        }
    }
}

/// Level change caused by a zero-crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// Moved on to the next level and kept running
    Advanced { from: usize, to: usize },
    /// The final level ran out; the clock stopped at zero
    Finished { level: usize },
}

/// Result of one polling tick while running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Clamped time left on the level that was running at `now`
    pub remaining_ms: i64,
    pub transition: Option<Transition>,
}

#[derive(Debug, Clone)]
pub struct ClockEngine {
    levels: LevelSequence,
    state: ClockState,
}

impl ClockEngine {
    /// Create a paused engine at `level_index` with the level's full duration.
    ///
    /// An index outside the sequence falls back to the first level.
    pub fn new(levels: LevelSequence, level_index: usize) -> Self {
        let level_index = if level_index < levels.len() { level_index } else { 0 };
        let remaining = levels.duration_ms(level_index);

        Self {
            levels,
            state: ClockState {
                level_index,
                basis: TimeBasis::Remaining(remaining),
            },
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn level_index(&self) -> usize {
        self.state.level_index
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn current_level(&self) -> &BlindLevel {
        self.levels.level(self.state.level_index)
    }

    pub fn next_level(&self) -> Option<&BlindLevel> {
        self.levels.get(self.state.level_index + 1)
    }

    /// Milliseconds left at `now`, never negative
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        self.state.raw_remaining_ms(now).max(0)
    }

    /// Returns false when already running.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        match self.state.basis {
            TimeBasis::EndsAt(_) => false,
            TimeBasis::Remaining(ms) => {
                self.state.basis = TimeBasis::EndsAt(offset_by_ms(now, ms));
                info!(level = self.level_index() + 1, remaining_ms = ms, "clock started");
                true
            }
        }
    }

    /// Returns false when already paused.
    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        match self.state.basis {
            TimeBasis::Remaining(_) => false,
            TimeBasis::EndsAt(end) => {
                let ms = (end - now).num_milliseconds().max(0);
                self.state.basis = TimeBasis::Remaining(ms);
                info!(level = self.level_index() + 1, remaining_ms = ms, "clock paused");
                true
            }
        }
    }

    pub fn add_minute(&mut self) {
        self.shift_ms(MINUTE_MS);
    }

    pub fn subtract_minute(&mut self) {
        self.shift_ms(-MINUTE_MS);
    }

    /// Move the time basis without touching the level. A paused clock pushed
    /// below zero stays on its level until it is started again.
    fn shift_ms(&mut self, delta_ms: i64) {
        self.state.basis = match self.state.basis {
            TimeBasis::EndsAt(end) => TimeBasis::EndsAt(offset_by_ms(end, delta_ms)),
            TimeBasis::Remaining(ms) => TimeBasis::Remaining(ms.saturating_add(delta_ms)),
        };
        debug!(delta_ms, basis = ?self.state.basis, "clock adjusted");
    }

    /// Go to the next level. Returns the new index, or `None` on the last level.
    pub fn step_next(&mut self, now: DateTime<Utc>) -> Option<usize> {
        if self.levels.is_last(self.state.level_index) {
            return None;
        }
        let index = self.state.level_index + 1;
        self.go_to(index, now);
        Some(index)
    }

    /// Go to the previous level. Returns the new index, or `None` on the first level.
    pub fn step_previous(&mut self, now: DateTime<Utc>) -> Option<usize> {
        let index = self.state.level_index.checked_sub(1)?;
        self.go_to(index, now);
        Some(index)
    }

    /// Reset timing for `index`, keeping the running/paused status.
    fn go_to(&mut self, index: usize, now: DateTime<Utc>) {
        let duration = self.levels.duration_ms(index);
        self.state = ClockState {
            level_index: index,
            basis: if self.state.is_running() {
                TimeBasis::EndsAt(offset_by_ms(now, duration))
            } else {
                TimeBasis::Remaining(duration)
            },
        };
        info!(level = index + 1, running = self.state.is_running(), "level changed");
    }

    /// Evaluate the clock at `now`. Returns `None` while paused.
    ///
    /// A running clock whose end instant has passed is handled here exactly
    /// once: either it advances and keeps running, or on the final level it
    /// stops at zero, so the next tick no longer sees an expired basis.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<TickOutcome> {
        if !self.state.is_running() {
            return None;
        }

        let remaining_ms = self.remaining_ms(now);
        if remaining_ms > 0 {
            return Some(TickOutcome {
                remaining_ms,
                transition: None,
            });
        }

        let from = self.state.level_index;
        let transition = match self.step_next(now) {
            Some(to) => Transition::Advanced { from, to },
            None => {
                self.state.basis = TimeBasis::Remaining(0);
                info!(level = from + 1, "final level finished, clock stopped");
                Transition::Finished { level: from }
            }
        };

        Some(TickOutcome {
            remaining_ms: 0,
            transition: Some(transition),
        })
    }
}

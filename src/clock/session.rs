//! Operator-facing tournament session
//!
//! Wraps the engine with the side channels that follow a level change: cue
//! flags are re-armed and the new index is persisted.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::levels::LevelSequence;

use super::{
    cues::{Cue, CueScheduler, CueState, ToneSink},
    display::ClockSnapshot,
    engine::{ClockEngine, Transition},
    persistence::LevelIndexPersistence,
};

/// What happened during one polling tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Clamped time left after any transition was applied
    pub remaining_ms: i64,
    pub cue: Option<Cue>,
    pub transition: Option<Transition>,
    pub running: bool,
}

#[derive(Debug)]
pub struct TournamentClock {
    engine: ClockEngine,
    cues: CueScheduler,
    persistence: LevelIndexPersistence,
}

impl TournamentClock {
    /// Open a paused session on the persisted level (or the first one).
    pub fn new(
        levels: LevelSequence,
        persistence: LevelIndexPersistence,
        sink: Arc<dyn ToneSink>,
    ) -> Self {
        let index = persistence.load_index(levels.len());

        Self {
            engine: ClockEngine::new(levels, index),
            cues: CueScheduler::new(sink),
            persistence,
        }
    }

    pub fn engine(&self) -> &ClockEngine {
        &self.engine
    }

    pub fn cue_state(&self) -> CueState {
        self.cues.state()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn level_index(&self) -> usize {
        self.engine.level_index()
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        self.engine.start(now)
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        self.engine.pause(now)
    }

    /// Returns whether the clock is running afterwards
    pub fn toggle_start_pause(&mut self, now: DateTime<Utc>) -> bool {
        if self.engine.is_running() {
            self.engine.pause(now);
        } else {
            self.engine.start(now);
        }
        self.engine.is_running()
    }

    pub fn add_minute(&mut self) {
        self.engine.add_minute();
    }

    pub fn subtract_minute(&mut self) {
        self.engine.subtract_minute();
    }

    pub fn step_next(&mut self, now: DateTime<Utc>) -> Option<usize> {
        let index = self.engine.step_next(now)?;
        self.level_changed(index);
        Some(index)
    }

    pub fn step_previous(&mut self, now: DateTime<Utc>) -> Option<usize> {
        let index = self.engine.step_previous(now)?;
        self.level_changed(index);
        Some(index)
    }

    /// Drive the clock from the polling loop. Returns `None` while paused.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<TickReport> {
        let outcome = self.engine.tick(now)?;

        // cues belong to the level that was running at `now`
        let cue = self.cues.observe(outcome.remaining_ms);
        if let Some(Transition::Advanced { to, .. }) = outcome.transition {
            self.level_changed(to);
        }

        Some(TickReport {
            remaining_ms: self.engine.remaining_ms(now),
            cue,
            transition: outcome.transition,
            running: self.engine.is_running(),
        })
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> ClockSnapshot {
        ClockSnapshot::capture(&self.engine, now)
    }

    fn level_changed(&mut self, index: usize) {
        self.cues.reset();
        self.persistence.save_index(index);
    }
}

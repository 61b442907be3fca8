//! Audible level cues
//!
//! Remaining time is recomputed every tick, so the same instant can be
//! observed many times (or skipped entirely after a long gap). The scheduler
//! keeps per-level flags so each cue sounds at most once per level.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::AudioError;

/// Remaining time at or below which the warning cue sounds
pub const WARNING_WINDOW_MS: i64 = 5_000;

/// Fade applied at the end of every tone to avoid clicks
pub const FADE_OUT: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Level is about to end
    Warning,
    /// Level just ended
    Transition,
}

/// Shape of the tone played for a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueTone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub fade_out: Duration,
}

impl Cue {
    pub fn tone(self) -> CueTone {
        match self {
            Cue::Warning => CueTone {
                frequency_hz: 494.0,
                duration: Duration::from_millis(150),
                fade_out: FADE_OUT,
            },
            Cue::Transition => CueTone {
                frequency_hz: 659.0,
                duration: Duration::from_millis(250),
                fade_out: FADE_OUT,
            },
        }
    }
}

/// Minimal audio capability the cue path needs.
///
/// Implementations shape the tone with [`FADE_OUT`] at its end.
pub trait ToneSink: Send + Sync {
    fn play_tone(
        &self,
        frequency_hz: f32,
        start_offset: Duration,
        duration: Duration,
    ) -> Result<(), AudioError>;
}

/// Drops every tone
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl ToneSink for SilentSink {
    fn play_tone(&self, _: f32, _: Duration, _: Duration) -> Result<(), AudioError> {
        Ok(())
    }
}

/// A tone request captured by [`RecordingSink`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayedTone {
    pub frequency_hz: f32,
    pub start_offset: Duration,
    pub duration: Duration,
}

/// Remembers every tone it is asked to play
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    played: Arc<Mutex<Vec<PlayedTone>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<PlayedTone> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl ToneSink for RecordingSink {
    fn play_tone(
        &self,
        frequency_hz: f32,
        start_offset: Duration,
        duration: Duration,
    ) -> Result<(), AudioError> {
        let mut played = self
            .played
            .lock()
            .map_err(|e| AudioError::Unavailable(e.to_string()))?;
        played.push(PlayedTone {
            frequency_hz,
            start_offset,
            duration,
        });
        Ok(())
    }
}

/// Which cues already sounded for the current level
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CueState {
    pub warning_fired: bool,
    pub transition_fired: bool,
}

pub struct CueScheduler {
    sink: Arc<dyn ToneSink>,
    state: CueState,
    last_remaining_ms: Option<i64>,
}

impl CueScheduler {
    pub fn new(sink: Arc<dyn ToneSink>) -> Self {
        Self {
            sink,
            state: CueState::default(),
            last_remaining_ms: None,
        }
    }

    pub fn state(&self) -> CueState {
        self.state
    }

    /// Forget everything about the previous level
    pub fn reset(&mut self) {
        self.state = CueState::default();
        self.last_remaining_ms = None;
    }

    /// Feed the remaining time of the running level and play whatever cue
    /// that reading calls for.
    ///
    /// When a single reading jumps straight from above the warning window to
    /// zero only the transition cue sounds.
    pub fn observe(&mut self, remaining_ms: i64) -> Option<Cue> {
        let previous = self.last_remaining_ms.replace(remaining_ms);

        let cue = if remaining_ms <= 0 {
            let crossed = previous.map_or(true, |prev| prev > 0);
            if crossed && !self.state.transition_fired {
                self.state.transition_fired = true;
                self.state.warning_fired = true;
                Some(Cue::Transition)
            } else {
                None
            }
        } else if remaining_ms <= WARNING_WINDOW_MS && !self.state.warning_fired {
            self.state.warning_fired = true;
            Some(Cue::Warning)
        } else {
            None
        };

        if let Some(cue) = cue {
            self.play(cue);
        }
        cue
    }

    fn play(&self, cue: Cue) {
        let tone = cue.tone();
        info!(?cue, frequency_hz = tone.frequency_hz, "cue");
        if let Err(e) = self
            .sink
            .play_tone(tone.frequency_hz, Duration::ZERO, tone.duration)
        {
            debug!("Skipping {:?} cue: {}", cue, e);
        }
    }
}

impl std::fmt::Debug for CueScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CueScheduler")
            .field("state", &self.state)
            .field("last_remaining_ms", &self.last_remaining_ms)
            .finish()
    }
}

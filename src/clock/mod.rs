//! Tournament clock core
//!
//! The engine derives remaining time from an absolute end timestamp, so a
//! late or skipped tick corrects itself on the next one. Cues, persistence and
//! display formatting are layered on top by [`TournamentClock`].

pub mod cues;
pub mod display;
pub mod engine;
pub mod persistence;
pub mod session;
pub mod time;

// Re-export main types
pub use cues::{Cue, CueScheduler, CueState, CueTone, PlayedTone, RecordingSink, SilentSink, ToneSink};
pub use display::{format_remaining, level_label, ClockSnapshot, LevelPanel};
pub use engine::{ClockEngine, ClockState, TickOutcome, TimeBasis, Transition};
pub use persistence::{JsonFileStore, LevelIndexPersistence, LevelStore, MemoryStore};
pub use session::{TickReport, TournamentClock};
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource};

//! Tournament Clock - a drift-free poker tournament clock served over HTTP
//! 
//! The clock counts down a fixed sequence of blind levels from absolute
//! timestamps, sounds cues near and at each level change, and remembers the
//! current level across restarts.

pub mod config;
pub mod error;
pub mod levels;
pub mod clock;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AudioError, ConfigurationError, PersistenceError};
pub use levels::{BlindLevel, LevelSequence};
pub use clock::{ClockEngine, ClockSnapshot, TournamentClock};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;

//! Host integrations
//!
//! Audio output and the display wake lock live outside the clock core; the
//! core only ever sees the [`ToneSink`](crate::clock::ToneSink) capability.

pub mod audio;
pub mod system;
pub mod wake_lock;

// Re-export main types
pub use audio::SoxToneSink;
pub use system::check_command_available;
pub use wake_lock::{NoopWakeLock, SystemdInhibitLock, WakeLock};

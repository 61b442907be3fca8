//! State management module
//! 
//! This module contains the shared clock view state and the intents that
//! mutate it.

pub mod app_state;
pub mod display_state;
pub mod intent;

// Re-export main types
pub use app_state::AppState;
pub use display_state::DisplayState;
pub use intent::ClockIntent;

//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod clock_ticker;

// Re-export main functions
pub use clock_ticker::clock_ticker_task;

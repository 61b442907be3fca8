//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::ClockSnapshot;

/// What the display client renders: the clock face plus view flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockResponse {
    #[serde(flatten)]
    pub clock: ClockSnapshot,
    pub fullscreen: bool,
}

/// Response to an operator intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResponse {
    pub action: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub view: ClockResponse,
}

impl IntentResponse {
    pub fn new(action: &str, view: ClockResponse) -> Self {
        Self {
            action: action.to_string(),
            timestamp: Utc::now(),
            view,
        }
    }
}

/// Clock view plus server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub view: ClockResponse,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

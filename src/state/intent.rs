//! Operator intents

use serde::{Deserialize, Serialize};

/// Everything the operator can ask the clock view to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClockIntent {
    ToggleStartPause,
    StepPrevious,
    StepNext,
    AddMinute,
    SubtractMinute,
    ToggleFullscreen,
}

impl ClockIntent {
    /// Name recorded as the last action
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockIntent::ToggleStartPause => "toggle-start-pause",
            ClockIntent::StepPrevious => "step-previous",
            ClockIntent::StepNext => "step-next",
            ClockIntent::AddMinute => "add-minute",
            ClockIntent::SubtractMinute => "subtract-minute",
            ClockIntent::ToggleFullscreen => "toggle-fullscreen",
        }
    }
}

impl std::fmt::Display for ClockIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

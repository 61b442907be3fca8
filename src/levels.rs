//! Blind-level structure
//!
//! A [`LevelSequence`] is loaded once and never changes for the lifetime of a
//! session. Construction is the only place the structure is checked.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Longest accepted level: one week
pub const MAX_LEVEL_MINUTES: f64 = 7.0 * 24.0 * 60.0;

/// One timed phase of the tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlindLevel {
    pub small: u64,
    pub big: u64,
    #[serde(default)]
    pub ante: u64,
    /// Level length in minutes
    #[serde(rename = "time")]
    pub duration_minutes: f64,
}

impl BlindLevel {
    pub fn new(small: u64, big: u64, ante: u64, duration_minutes: f64) -> Self {
        Self {
            small,
            big,
            ante,
            duration_minutes,
        }
    }

    /// Full length of the level in milliseconds
    pub fn duration_ms(&self) -> i64 {
        (self.duration_minutes * MS_PER_MINUTE).round() as i64
    }

    /// Blinds as shown on the clock, e.g. `"100 / 200"`
    pub fn blinds_label(&self) -> String {
        format!("{} / {}", self.small, self.big)
    }
}

/// Non-empty, immutable, index-addressable list of blind levels
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSequence {
    levels: Vec<BlindLevel>,
}

impl LevelSequence {
    /// Build a sequence, rejecting an empty list or any level whose duration
    /// is not a positive number of minutes up to [`MAX_LEVEL_MINUTES`].
    pub fn new(levels: Vec<BlindLevel>) -> Result<Self, ConfigurationError> {
        if levels.is_empty() {
            return Err(ConfigurationError::EmptySequence);
        }

        for (index, level) in levels.iter().enumerate() {
            let minutes = level.duration_minutes;
            if !minutes.is_finite()
                || minutes <= 0.0
                || minutes > MAX_LEVEL_MINUTES
                || level.duration_ms() <= 0
            {
                return Err(ConfigurationError::InvalidDuration {
                    level: index + 1,
                    minutes,
                });
            }
        }

        Ok(Self { levels })
    }

    /// Parse a JSON array of `{ small, big, ante, time }` objects
    pub fn from_json_str(raw: &str) -> Result<Vec<BlindLevel>, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Load and validate a sequence from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigurationError::unreadable(path, e))?;
        let levels =
            Self::from_json_str(&raw).map_err(|e| ConfigurationError::malformed(path, e))?;
        Self::new(levels)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BlindLevel> {
        self.levels.get(index)
    }

    pub fn last_index(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn is_last(&self, index: usize) -> bool {
        index >= self.last_index()
    }

    /// Level at `index`.
    ///
    /// Callers only pass indices they have already bounded by [`len`](Self::len).
    pub fn level(&self, index: usize) -> &BlindLevel {
        &self.levels[index]
    }

    pub fn duration_ms(&self, index: usize) -> i64 {
        self.level(index).duration_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_sequence() {
        let err = LevelSequence::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptySequence));
        assert!(err.to_string().contains("no valid levels configured"));
    }

    #[test]
    fn rejects_out_of_range_durations() {
        for minutes in [0.0, -5.0, f64::NAN, f64::INFINITY, 1e12, 1e300] {
            let levels = vec![
                BlindLevel::new(25, 50, 0, 15.0),
                BlindLevel::new(50, 100, 0, minutes),
            ];
            let err = LevelSequence::new(levels).unwrap_err();
            assert!(
                matches!(err, ConfigurationError::InvalidDuration { level: 2, .. }),
                "expected level 2 to be rejected for {minutes}"
            );
        }
    }

    #[test]
    fn accepts_a_week_long_level() {
        let sequence =
            LevelSequence::new(vec![BlindLevel::new(1, 2, 0, MAX_LEVEL_MINUTES)]).unwrap();
        assert_eq!(sequence.duration_ms(0), 7 * 24 * 60 * 60_000);
    }

    #[test]
    fn parses_structure_json() {
        let raw = r#"[
            { "small": 25, "big": 50, "ante": 0, "time": 20 },
            { "small": 50, "big": 100, "time": 0.5 }
        ]"#;
        let levels = LevelSequence::from_json_str(raw).unwrap();
        let sequence = LevelSequence::new(levels).unwrap();

        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.duration_ms(0), 20 * 60_000);
        assert_eq!(sequence.duration_ms(1), 30_000);
        assert_eq!(sequence.get(1).unwrap().ante, 0);
        assert!(sequence.is_last(1));
        assert!(!sequence.is_last(0));
    }

    #[test]
    fn blinds_label_uses_slash() {
        assert_eq!(BlindLevel::new(100, 200, 25, 15.0).blinds_label(), "100 / 200");
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let err = LevelSequence::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigurationError::Unreadable { .. }));
    }
}

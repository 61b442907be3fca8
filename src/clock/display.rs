//! What the clock face shows

use serde::{Deserialize, Serialize};

use crate::levels::BlindLevel;

use super::engine::ClockEngine;

/// `M:SS` with unpadded minutes. Negative values show as `0:00`.
pub fn format_remaining(remaining_ms: i64) -> String {
    let total_seconds = remaining_ms.max(0) / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// 1-based label, e.g. `"Level 3"`
pub fn level_label(index: usize) -> String {
    format!("Level {}", index + 1)
}

/// Blinds and ante for one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPanel {
    pub blinds: String,
    pub ante: String,
}

impl From<&BlindLevel> for LevelPanel {
    fn from(level: &BlindLevel) -> Self {
        Self {
            blinds: level.blinds_label(),
            ante: level.ante.to_string(),
        }
    }
}

/// Everything the presentation layer renders for one polling tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub remaining_ms: i64,
    pub remaining: String,
    pub level_index: usize,
    pub level: String,
    pub running: bool,
    pub current: LevelPanel,
    /// Absent on the final level
    pub next: Option<LevelPanel>,
}

impl ClockSnapshot {
    pub fn capture(engine: &ClockEngine, now: chrono::DateTime<chrono::Utc>) -> Self {
        let remaining_ms = engine.remaining_ms(now);
        let level_index = engine.level_index();

        Self {
            remaining_ms,
            remaining: format_remaining(remaining_ms),
            level_index,
            level: level_label(level_index),
            running: engine.is_running(),
            current: LevelPanel::from(engine.current_level()),
            next: engine.next_level().map(LevelPanel::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::levels::LevelSequence;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_remaining(300_000), "5:00");
        assert_eq!(format_remaining(5_000), "0:05");
        assert_eq!(format_remaining(4_999), "0:04");
        assert_eq!(format_remaining(61_000), "1:01");
        assert_eq!(format_remaining(3_600_000), "60:00");
        assert_eq!(format_remaining(0), "0:00");
        assert_eq!(format_remaining(-45_000), "0:00");
    }

    #[test]
    fn labels_are_one_based() {
        assert_eq!(level_label(0), "Level 1");
        assert_eq!(level_label(11), "Level 12");
    }

    #[test]
    fn next_panel_is_omitted_on_final_level() {
        let levels = LevelSequence::new(vec![
            BlindLevel::new(25, 50, 0, 15.0),
            BlindLevel::new(50, 100, 10, 15.0),
        ])
        .unwrap();
        let now: DateTime<Utc> = DateTime::from_timestamp(0, 0).unwrap();

        let first = ClockSnapshot::capture(&ClockEngine::new(levels.clone(), 0), now);
        assert_eq!(first.level, "Level 1");
        assert_eq!(first.remaining, "15:00");
        assert_eq!(first.current.blinds, "25 / 50");
        assert_eq!(
            first.next,
            Some(LevelPanel {
                blinds: "50 / 100".into(),
                ante: "10".into()
            })
        );

        let last = ClockSnapshot::capture(&ClockEngine::new(levels, 1), now);
        assert_eq!(last.current.ante, "10");
        assert_eq!(last.next, None);
    }
}

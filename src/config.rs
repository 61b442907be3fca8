//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "tournament-clock")]
#[command(about = "A drift-free poker tournament clock served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// JSON file with the blind structure: [{"small", "big", "ante", "time"}, ...]
    #[arg(short, long)]
    pub levels: PathBuf,

    /// JSON key-value file remembering the current level between runs
    #[arg(long, default_value = "tournament-clock-state.json")]
    pub state_file: PathBuf,

    /// Key the current level index is stored under
    #[arg(long, default_value = "tournamentClock.currentLevel")]
    pub storage_key: String,

    /// Polling interval while the clock runs, in milliseconds
    #[arg(long, default_value = "500", value_parser = clap::value_parser!(u64).range(100..=1000))]
    pub poll_interval_ms: u64,

    /// Never play cue tones
    #[arg(long)]
    pub no_audio: bool,

    /// Do not hold a wake lock while the clock is up
    #[arg(long)]
    pub no_wake_lock: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = Config::try_parse_from(["tournament-clock", "--levels", "levels.json"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.storage_key, "tournamentClock.currentLevel");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn levels_file_is_required() {
        assert!(Config::try_parse_from(["tournament-clock"]).is_err());
    }

    #[test]
    fn poll_interval_is_bounded() {
        let too_slow = ["tournament-clock", "-l", "x.json", "--poll-interval-ms", "5000"];
        assert!(Config::try_parse_from(too_slow).is_err());

        let ok = ["tournament-clock", "-l", "x.json", "--poll-interval-ms", "1000", "-v"];
        let config = Config::try_parse_from(ok).unwrap();
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.log_level(), "debug");
    }
}

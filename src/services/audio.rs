//! Tone playback through SoX

use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::{
    clock::{cues::FADE_OUT, ToneSink},
    error::AudioError,
};

/// Plays each tone by spawning SoX's `play` with a sine synth.
///
/// The child is never awaited; a tick never blocks on audio.
#[derive(Debug, Clone)]
pub struct SoxToneSink {
    program: String,
}

impl SoxToneSink {
    pub fn new() -> Self {
        Self::with_program("play")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments for one tone: optional leading silence, a sine at
    /// `frequency_hz` and a linear fade over the last [`FADE_OUT`].
    pub fn tone_args(frequency_hz: f32, start_offset: Duration, duration: Duration) -> Vec<String> {
        let length = duration.as_secs_f32();
        let fade = FADE_OUT.min(duration).as_secs_f32();

        let mut args = vec![
            "-q".to_string(),
            "-n".to_string(),
            "synth".to_string(),
            format!("{length:.3}"),
            "sine".to_string(),
            format!("{frequency_hz:.1}"),
            "fade".to_string(),
            "t".to_string(),
            "0".to_string(),
            format!("{length:.3}"),
            format!("{fade:.3}"),
        ];
        if !start_offset.is_zero() {
            args.extend([
                "pad".to_string(),
                format!("{:.3}", start_offset.as_secs_f32()),
            ]);
        }
        args
    }
}

impl Default for SoxToneSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneSink for SoxToneSink {
    fn play_tone(
        &self,
        frequency_hz: f32,
        start_offset: Duration,
        duration: Duration,
    ) -> Result<(), AudioError> {
        let args = Self::tone_args(frequency_hz, start_offset, duration);
        debug!("Spawning {} {:?}", self.program, args);

        Command::new(&self.program).args(&args).spawn()?;
        Ok(())
    }
}

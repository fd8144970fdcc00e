//! Audio playback through an external player
//!
//! Synthesized buffers are written to a temporary WAV file and handed to
//! whichever command-line player is installed. Playback blocks until the
//! player exits.

use crate::audio::buffer::AudioBuffer;
use crate::audio::wav::write_wav;
use crate::{Result, SynthError};
use log::{debug, error, info};
use std::process::{Command, Stdio};

/// Something that can consume synthesized audio as it is produced
pub trait AudioSink {
    /// Play (or otherwise consume) one utterance
    fn play(&mut self, audio: &AudioBuffer) -> Result<()>;
}

/// Players tried in order when none is configured
const KNOWN_PLAYERS: &[&str] = &["aplay", "paplay", "afplay", "ffplay"];

/// Plays audio by running a command-line player on a temporary WAV file
pub struct CommandPlayer {
    /// Player executable
    program: String,
}

impl CommandPlayer {
    /// Find a usable player
    ///
    /// A configured player is used as-is when it runs; otherwise the known
    /// players are tried in order.
    pub fn detect(preferred: Option<&str>) -> Result<Self> {
        if let Some(program) = preferred {
            if Self::is_available(program) {
                info!("Using configured player {}", program);
                return Ok(Self {
                    program: program.to_string(),
                });
            }
            return Err(SynthError::Playback(format!(
                "configured player '{}' not found",
                program
            )));
        }

        for program in KNOWN_PLAYERS {
            if Self::is_available(program) {
                info!("Detected player {}", program);
                return Ok(Self {
                    program: program.to_string(),
                });
            }
        }

        Err(SynthError::Playback(format!(
            "no audio player found. Install one of: {}",
            KNOWN_PLAYERS.join(", ")
        )))
    }

    /// Player executable in use
    pub fn program(&self) -> &str {
        &self.program
    }

    fn is_available(program: &str) -> bool {
        // ffplay has no --version flag
        let version_flag = if program.ends_with("ffplay") {
            "-version"
        } else {
            "--version"
        };
        Command::new(program)
            .arg(version_flag)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    /// Extra arguments so the player exits on its own without a window
    fn player_args(&self) -> &'static [&'static str] {
        if self.program.ends_with("ffplay") {
            &["-autoexit", "-nodisp", "-loglevel", "error"]
        } else if self.program.ends_with("aplay") && !self.program.ends_with("paplay") {
            &["-q"]
        } else {
            &[]
        }
    }
}

impl AudioSink for CommandPlayer {
    fn play(&mut self, audio: &AudioBuffer) -> Result<()> {
        if audio.is_empty() {
            debug!("Nothing to play");
            return Ok(());
        }

        let temp_file = tempfile::Builder::new()
            .prefix("dsynth-play-")
            .suffix(".wav")
            .tempfile()?;
        write_wav(temp_file.path(), audio)?;

        debug!(
            "Playing {} ms of audio with {}",
            audio.duration_ms(),
            self.program
        );
        let status = Command::new(&self.program)
            .args(self.player_args())
            .arg(temp_file.path())
            .stdout(Stdio::null())
            .status()
            .map_err(|e| {
                error!("Failed to spawn {}: {}", self.program, e);
                SynthError::Playback(format!("failed to start {}: {}", self.program, e))
            })?;

        if !status.success() {
            return Err(SynthError::Playback(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configured_player() {
        let result = CommandPlayer::detect(Some("dsynth-no-such-player"));
        assert!(matches!(result, Err(SynthError::Playback(_))));
    }

    #[test]
    fn test_player_args() {
        let ffplay = CommandPlayer {
            program: "ffplay".to_string(),
        };
        assert!(ffplay.player_args().contains(&"-autoexit"));

        let paplay = CommandPlayer {
            program: "paplay".to_string(),
        };
        assert!(paplay.player_args().is_empty());

        let aplay = CommandPlayer {
            program: "/usr/bin/aplay".to_string(),
        };
        assert_eq!(aplay.player_args(), &["-q"]);
    }

    #[test]
    fn test_detect_picks_known_player() {
        match CommandPlayer::detect(None) {
            Ok(player) => {
                assert!(KNOWN_PLAYERS.contains(&player.program()));
                assert!(CommandPlayer::is_available(player.program()));
            }
            Err(e) => assert!(matches!(e, SynthError::Playback(_))),
        }
    }
}

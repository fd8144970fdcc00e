//! Per-utterance synthesis options

use clap::ValueEnum;
use std::fmt;

/// What to play backwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReverseMode {
    /// Reverse word order before transcription
    Words,
    /// Reverse the phone sequence, silence markers included
    Phones,
    /// Reverse the final waveform
    Signal,
}

impl fmt::Display for ReverseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReverseMode::Words => "words",
            ReverseMode::Phones => "phones",
            ReverseMode::Signal => "signal",
        };
        f.write_str(name)
    }
}

/// Options applied to every utterance of a run
#[derive(Debug, Clone, Default)]
pub struct SynthOptions {
    /// Spell words letter by letter
    pub spell: bool,
    pub reverse: Option<ReverseMode>,
    /// Join units with overlap-add instead of plain concatenation
    pub crossfade: bool,
    /// Raw volume argument (0-100); invalid values are reported and ignored
    pub volume: Option<String>,
}

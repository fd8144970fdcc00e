//! Waveform synthesis from diphone keys
//!
//! The synthesizer resolves each diphone key against a [`DiphoneLibrary`] and
//! joins the resulting sample buffers into one utterance:
//!
//! 1. Missing units become zero-length silence so one gap in the library only
//!    degrades the utterance locally.
//! 2. Units are concatenated flat, or with overlap-add crossfading when asked.
//! 3. `ReverseMode::Signal` reverses the joined waveform last.

pub mod crossfade;

use crate::audio::{AudioBuffer, AudioFormat};
use crate::diphone::DiphoneLibrary;
use crate::options::ReverseMode;
use crossfade::crossfade_all;
use log::{debug, warn};

/// Tunables shared by every synthesis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthSettings {
    /// Crossfade overlap in seconds
    pub overlap_seconds: f64,

    /// Format reported for output when the library has no units
    pub fallback_format: AudioFormat,
}

impl SynthSettings {
    /// 10 ms overlap between units
    pub const DEFAULT_OVERLAP_SECONDS: f64 = 0.01;
}

impl Default for SynthSettings {
    fn default() -> Self {
        Self {
            overlap_seconds: Self::DEFAULT_OVERLAP_SECONDS,
            fallback_format: AudioFormat::default(),
        }
    }
}

/// Joins diphone units into utterances
pub struct WaveformSynthesizer<'a> {
    library: &'a DiphoneLibrary,
    settings: SynthSettings,
}

impl<'a> WaveformSynthesizer<'a> {
    pub fn new(library: &'a DiphoneLibrary, settings: SynthSettings) -> Self {
        Self { library, settings }
    }

    /// Output format: the library's, or the fallback for an empty library
    pub fn format(&self) -> AudioFormat {
        self.library
            .format()
            .unwrap_or(self.settings.fallback_format)
    }

    /// Crossfade overlap in samples at the output rate
    pub fn overlap_samples(&self) -> usize {
        self.format().samples_for(self.settings.overlap_seconds)
    }

    /// Look up every key, substituting empty buffers for missing units
    ///
    /// Returns the sample slices in key order and the number of hits.
    fn resolve<S: AsRef<str>>(&self, keys: &[S]) -> (Vec<&'a [i32]>, usize) {
        let mut found = 0;
        let parts = keys
            .iter()
            .map(|key| match self.library.lookup(key.as_ref()) {
                Some(unit) => {
                    found += 1;
                    unit.audio().samples()
                }
                None => {
                    warn!("No diphone unit for '{}', using silence", key.as_ref());
                    &[][..]
                }
            })
            .collect();
        (parts, found)
    }

    /// Synthesize the waveform for a sequence of diphone keys
    ///
    /// Never fails: if no key resolves the result is an empty buffer and a
    /// warning is logged.
    pub fn synthesize<S: AsRef<str>>(
        &self,
        keys: &[S],
        reverse: Option<ReverseMode>,
        crossfade: bool,
    ) -> AudioBuffer {
        let format = self.format();
        let (parts, found) = self.resolve(keys);
        debug!("Resolved {}/{} diphones", found, keys.len());

        if found == 0 {
            warn!("There is no corresponding diphone file for any unit in this utterance");
            return AudioBuffer::empty(format);
        }

        let samples = if crossfade {
            let n = self.overlap_samples();
            debug!("Crossfading with {} sample overlap", n);
            crossfade_all(&parts, n, format.width)
        } else {
            parts.concat()
        };

        let mut audio = AudioBuffer::from_samples(samples, format);
        if reverse == Some(ReverseMode::Signal) {
            audio.reverse();
        }
        audio
    }
}

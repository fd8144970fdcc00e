//! Phrase to waveform pipeline
//!
//! Ties the stages together: normalize and transcribe the phrase, derive the
//! diphone keys, synthesize, then apply the requested volume. Batch mode runs
//! the same steps once per line of a text file, reporting failures on a line
//! and moving on to the next.

use crate::audio::{parse_volume, AudioBuffer, AudioSink};
use crate::diphone::{phones_to_diphones, DiphoneLibrary};
use crate::options::SynthOptions;
use crate::synth::{SynthSettings, WaveformSynthesizer};
use crate::text::{Lexicon, Utterance};
use crate::Result;
use log::{debug, error, info, warn};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Everything needed to turn text into audio
pub struct Pipeline<L: Lexicon> {
    library: DiphoneLibrary,
    lexicon: L,
    settings: SynthSettings,
}

impl<L: Lexicon> Pipeline<L> {
    pub fn new(library: DiphoneLibrary, lexicon: L, settings: SynthSettings) -> Self {
        Self {
            library,
            lexicon,
            settings,
        }
    }

    /// Synthesizer borrowing this pipeline's library
    pub fn synthesizer(&self) -> WaveformSynthesizer<'_> {
        WaveformSynthesizer::new(&self.library, self.settings)
    }

    /// Synthesize one phrase
    ///
    /// Returns `None` when the phrase has no words left after normalization.
    /// Fails only when the phrase cannot be transcribed. Missing diphones
    /// degrade the audio instead, and an invalid volume is reported and
    /// ignored.
    pub fn speak_phrase(
        &self,
        phrase: &str,
        options: &SynthOptions,
    ) -> Result<Option<AudioBuffer>> {
        let mut utterance = Utterance::new(phrase);
        if utterance.tokens().is_empty() {
            debug!("Nothing to say in {:?}", phrase);
            return Ok(None);
        }
        let phones = utterance.phone_sequence(&self.lexicon, options.spell, options.reverse)?;
        let keys = phones_to_diphones(phones);
        debug!("Diphones: {:?}", keys);

        let mut audio = self
            .synthesizer()
            .synthesize(&keys, options.reverse, options.crossfade);

        if let Some(raw) = options.volume.as_deref() {
            match parse_volume(raw) {
                Ok(factor) => audio.rescale(factor)?,
                Err(e) => warn!("{}; volume left unchanged", e),
            }
        }

        Ok(Some(audio))
    }

    /// Synthesize every non-blank line of a reader
    ///
    /// Lines that fail to transcribe are reported and skipped, and bytes that
    /// are not UTF-8 are replaced rather than ending the batch. Each finished
    /// utterance is handed to `sink` before the next line is processed.
    pub fn speak_lines<R: BufRead>(
        &self,
        reader: R,
        options: &SynthOptions,
        mut sink: Option<&mut dyn AudioSink>,
    ) -> Result<Vec<AudioBuffer>> {
        let mut outputs = Vec::new();

        for (number, raw) in reader.split(b'\n').enumerate() {
            let raw = raw?;
            let line = String::from_utf8_lossy(&raw);
            if matches!(line, Cow::Owned(_)) {
                warn!("Line {}: invalid UTF-8 replaced", number + 1);
            }
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let audio = match self.speak_phrase(line, options) {
                Ok(Some(audio)) => audio,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Line {}: {}; skipping", number + 1, e);
                    continue;
                }
            };

            if let Some(sink) = sink.as_deref_mut() {
                if let Err(e) = sink.play(&audio) {
                    error!("Line {}: playback failed: {}", number + 1, e);
                }
            }
            outputs.push(audio);
        }

        info!("Synthesized {} utterances", outputs.len());
        Ok(outputs)
    }

    /// Synthesize every line of a text file
    pub fn speak_file(
        &self,
        path: impl AsRef<Path>,
        options: &SynthOptions,
        sink: Option<&mut dyn AudioSink>,
    ) -> Result<Vec<AudioBuffer>> {
        let path = path.as_ref();
        debug!("Reading phrases from {:?}", path);
        let file = File::open(path)?;
        self.speak_lines(BufReader::new(file), options, sink)
    }
}

/// Concatenate utterances into one buffer
///
/// Returns `None` when there is nothing to join.
pub fn join(buffers: &[AudioBuffer]) -> Result<Option<AudioBuffer>> {
    let Some(first) = buffers.first() else {
        return Ok(None);
    };
    let mut joined = AudioBuffer::empty(first.format());
    for buffer in buffers {
        joined.append(buffer)?;
    }
    Ok(Some(joined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioFormat, SampleWidth};
    use crate::options::ReverseMode;
    use crate::text::CmuDict;
    use crate::SynthError;
    use std::io::Cursor;

    struct Recorder {
        played: Vec<usize>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, audio: &AudioBuffer) -> Result<()> {
            self.played.push(audio.len());
            Ok(())
        }
    }

    fn pipeline() -> Pipeline<CmuDict> {
        let format = AudioFormat::new(1_000, SampleWidth::I16);
        let library = DiphoneLibrary::from_buffers([
            ("pau-p", AudioBuffer::from_samples(vec![1_000; 200], format)),
            ("p-iy", AudioBuffer::from_samples(vec![2_000; 300], format)),
            ("iy-pau", AudioBuffer::from_samples(vec![3_000; 150], format)),
        ])
        .unwrap();
        let lexicon = CmuDict::from_entries([("pea", ["P", "IY1"])]);
        Pipeline::new(library, lexicon, SynthSettings::default())
    }

    #[test]
    fn test_speak_phrase() {
        let audio = pipeline()
            .speak_phrase("Pea.", &SynthOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(audio.len(), 650);
    }

    #[test]
    fn test_phrase_without_words_says_nothing() {
        let format = AudioFormat::new(1_000, SampleWidth::I16);
        let library = DiphoneLibrary::from_buffers([(
            "pau-pau",
            AudioBuffer::from_samples(vec![7; 500], format),
        )])
        .unwrap();
        let pipeline = Pipeline::new(library, CmuDict::default(), SynthSettings::default());

        for phrase in ["?!...", "", "   "] {
            let result = pipeline.speak_phrase(phrase, &SynthOptions::default());
            assert!(matches!(result, Ok(None)), "{:?}", phrase);
        }
    }

    #[test]
    fn test_unknown_word_fails() {
        let result = pipeline().speak_phrase("pea soup", &SynthOptions::default());
        assert!(matches!(result, Err(SynthError::UnknownWord(w)) if w == "soup"));
    }

    #[test]
    fn test_volume_applied() {
        let options = SynthOptions {
            volume: Some("50".to_string()),
            ..SynthOptions::default()
        };
        let audio = pipeline().speak_phrase("pea", &options).unwrap().unwrap();
        assert_eq!(audio.samples()[0], 500);
    }

    #[test]
    fn test_bad_volume_ignored() {
        for raw in ["150", "loud"] {
            let options = SynthOptions {
                volume: Some(raw.to_string()),
                ..SynthOptions::default()
            };
            let audio = pipeline().speak_phrase("pea", &options).unwrap().unwrap();
            assert_eq!(audio.samples()[0], 1_000);
        }
    }

    #[test]
    fn test_reverse_phones_misses_units() {
        // the reversed sequence needs "iy-p", which the library lacks
        let options = SynthOptions {
            reverse: Some(ReverseMode::Phones),
            ..SynthOptions::default()
        };
        let audio = pipeline().speak_phrase("pea", &options).unwrap().unwrap();
        assert_eq!(audio.len(), 0);
    }

    #[test]
    fn test_lines_skip_failures_and_play_each() {
        let text = "pea\n\nmystery word\npea pea\n";
        let mut recorder = Recorder { played: Vec::new() };
        let outputs = pipeline()
            .speak_lines(
                Cursor::new(text),
                &SynthOptions::default(),
                Some(&mut recorder),
            )
            .unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(recorder.played, vec![650, outputs[1].len()]);
    }

    #[test]
    fn test_lines_survive_invalid_utf8() {
        let text: &[u8] = b"pea\n\xff\xfe bad\npea\r\n?!\n";
        let outputs = pipeline()
            .speak_lines(Cursor::new(text), &SynthOptions::default(), None)
            .unwrap();

        assert_eq!(outputs.len(), 2);
        assert!(outputs.iter().all(|audio| audio.len() == 650));
    }

    #[test]
    fn test_join() {
        let format = AudioFormat::new(1_000, SampleWidth::I16);
        let parts = vec![
            AudioBuffer::from_samples(vec![1, 2], format),
            AudioBuffer::from_samples(vec![3], format),
        ];
        let joined = join(&parts).unwrap().unwrap();
        assert_eq!(joined.samples(), &[1, 2, 3]);
        assert!(join(&[]).unwrap().is_none());
    }
}

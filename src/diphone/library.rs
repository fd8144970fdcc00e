//! Diphone unit library
//!
//! A library is a read-only map from diphone name (`"p-iy"`) to the recorded
//! audio for that transition. It is built once from a directory holding one
//! WAV file per unit, where the unit name is the part of the file name before
//! the first dot. Every unit in a library shares one rate and sample width.

use crate::audio::{read_wav, AudioBuffer, AudioFormat};
use crate::{Result, SynthError};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One recorded diphone
#[derive(Debug, Clone)]
pub struct DiphoneUnit {
    /// Lowercase unit name, e.g. `"p-iy"`
    name: String,
    audio: AudioBuffer,
}

impl DiphoneUnit {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn audio(&self) -> &AudioBuffer {
        &self.audio
    }
}

/// Immutable collection of diphone units keyed by lowercase name
#[derive(Debug, Clone, Default)]
pub struct DiphoneLibrary {
    units: HashMap<String, DiphoneUnit>,

    /// Shared format of all units, `None` while the library is empty
    format: Option<AudioFormat>,
}

/// Derive a unit key from a file name: text before the first dot, lowercased
///
/// Returns `None` when the name has no dot or nothing precedes it.
pub fn unit_key(file_name: &str) -> Option<String> {
    let (stem, _) = file_name.split_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.to_lowercase())
}

impl DiphoneLibrary {
    /// Load every unit in `directory`
    ///
    /// Files are visited in name order. When two files map to the same key the
    /// first one is kept and the later one is reported and ignored.
    pub fn load(directory: impl AsRef<Path>) -> Result<Self> {
        let directory = directory.as_ref();
        debug!("Loading diphones from {:?}", directory);

        let entries = fs::read_dir(directory).map_err(|e| {
            SynthError::Library(format!(
                "cannot read diphone directory {}: {}",
                directory.display(),
                e
            ))
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            // follows symlinks, so linked voice sets load too
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        let mut library = Self::default();
        for path in files {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                warn!("Skipping file with non UTF-8 name: {:?}", path);
                continue;
            };
            let Some(key) = unit_key(file_name) else {
                warn!("Skipping {:?}: no unit name before '.'", path);
                continue;
            };
            if library.units.contains_key(&key) {
                warn!(
                    "Duplicate diphone '{}' in {:?} ignored, keeping the first one loaded",
                    key, path
                );
                continue;
            }

            let audio = read_wav(&path).map_err(|e| {
                SynthError::Library(format!("failed to load {}: {}", path.display(), e))
            })?;
            library.insert(key, audio)?;
        }

        info!(
            "Loaded {} diphone units from {:?}",
            library.len(),
            directory
        );
        Ok(library)
    }

    /// Build a library from in-memory units
    ///
    /// Keys are lowercased and the first occurrence of a key wins, as with
    /// [`DiphoneLibrary::load`].
    pub fn from_buffers<K, I>(units: I) -> Result<Self>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, AudioBuffer)>,
    {
        let mut library = Self::default();
        for (key, audio) in units {
            let key = key.as_ref().to_lowercase();
            if library.units.contains_key(&key) {
                warn!("Duplicate diphone '{}' ignored", key);
                continue;
            }
            library.insert(key, audio)?;
        }
        Ok(library)
    }

    fn insert(&mut self, key: String, audio: AudioBuffer) -> Result<()> {
        match self.format {
            None => self.format = Some(audio.format()),
            Some(format) if format != audio.format() => {
                return Err(SynthError::Library(format!(
                    "diphone '{}' is {:?} but the library is {:?}",
                    key,
                    audio.format(),
                    format
                )));
            }
            Some(_) => {}
        }

        self.units.insert(
            key.clone(),
            DiphoneUnit {
                name: key,
                audio,
            },
        );
        Ok(())
    }

    /// Find a unit by name, ignoring case
    pub fn lookup(&self, key: &str) -> Option<&DiphoneUnit> {
        self.units.get(&key.to_lowercase())
    }

    /// Shared format of the loaded units
    pub fn format(&self) -> Option<AudioFormat> {
        self.format
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SampleWidth;

    fn unit(samples: Vec<i32>, rate: u32) -> AudioBuffer {
        AudioBuffer::from_samples(samples, AudioFormat::new(rate, SampleWidth::I16))
    }

    #[test]
    fn test_unit_key() {
        assert_eq!(unit_key("p-iy.wav"), Some("p-iy".to_string()));
        assert_eq!(unit_key("PAU-P.wav"), Some("pau-p".to_string()));
        assert_eq!(unit_key("aa-b.take2.wav"), Some("aa-b".to_string()));
        assert_eq!(unit_key("README"), None);
        assert_eq!(unit_key(".hidden"), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let library = DiphoneLibrary::from_buffers([("P-IY", unit(vec![1, 2], 16_000))]).unwrap();
        assert!(library.lookup("p-iy").is_some());
        assert!(library.lookup("P-iy").is_some());
        assert_eq!(library.lookup("p-iy").unwrap().name(), "p-iy");
        assert!(library.lookup("iy-p").is_none());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let library = DiphoneLibrary::from_buffers([
            ("a-b", unit(vec![1], 16_000)),
            ("A-B", unit(vec![2, 2], 16_000)),
        ])
        .unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.lookup("a-b").unwrap().audio().samples(), &[1]);
    }

    #[test]
    fn test_mixed_rates_rejected() {
        let result = DiphoneLibrary::from_buffers([
            ("a-b", unit(vec![1], 16_000)),
            ("b-c", unit(vec![1], 8_000)),
        ]);
        assert!(matches!(result, Err(SynthError::Library(_))));
    }

    #[test]
    fn test_empty_library() {
        let library = DiphoneLibrary::default();
        assert!(library.is_empty());
        assert!(library.format().is_none());
        assert!(library.lookup("pau-p").is_none());
    }
}

//! Pronunciation dictionaries
//!
//! The transcriber only needs to ask "how is this word pronounced?", so the
//! dictionary sits behind the [`Lexicon`] trait. [`CmuDict`] reads the CMU
//! Pronouncing Dictionary either in its plain text distribution format or as a
//! JSON object mapping each word to a list of pronunciation variants.

use crate::{Result, SynthError};
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One pronunciation: an ordered list of phone labels, e.g. `["P", "IY1"]`
pub type Pronunciation = Vec<String>;

/// Source of word pronunciations
pub trait Lexicon {
    /// All pronunciation variants of a lowercase word, most common first
    fn pronunciations(&self, word: &str) -> Option<&[Pronunciation]>;

    /// First listed pronunciation of a word
    fn pronounce(&self, word: &str) -> Option<&Pronunciation> {
        self.pronunciations(word).and_then(|variants| variants.first())
    }
}

/// CMU Pronouncing Dictionary held in memory
#[derive(Debug, Clone, Default)]
pub struct CmuDict {
    entries: HashMap<String, Vec<Pronunciation>>,
}

impl CmuDict {
    /// Load a dictionary file
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as CMU text.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading pronunciation dictionary from {:?}", path);

        let contents = fs::read_to_string(path).map_err(|e| {
            SynthError::Dictionary(format!("cannot read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let dict = if is_json {
            Self::from_json(&contents)?
        } else {
            Self::from_cmu_text(&contents)
        };

        info!("Loaded {} dictionary words from {:?}", dict.len(), path);
        Ok(dict)
    }

    /// Parse `{"word": [["P", "IY1"], ...], ...}`
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<Pronunciation>> = serde_json::from_str(json)?;
        let mut dict = Self::default();
        for (word, variants) in raw {
            for variant in variants {
                dict.add(&word, variant);
            }
        }
        Ok(dict)
    }

    /// Parse the CMU text format
    ///
    /// One entry per line: `WORD PH1 PH2 ...`. Alternate pronunciations are
    /// written `WORD(2) ...` and are appended to the base word in file order.
    /// A numeric second column, as in the NLTK copy of the dictionary, is
    /// ignored. Lines starting with `;;;` or `#` are comments.
    pub fn from_cmu_text(text: &str) -> Self {
        let mut dict = Self::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(head) = fields.next() else {
                continue;
            };
            let word = match head.find('(') {
                Some(idx) if head.ends_with(')') && idx > 0 => &head[..idx],
                _ => head,
            };

            let mut phones: Pronunciation = fields.map(str::to_string).collect();
            if phones
                .first()
                .map(|p| p.chars().all(|c| c.is_ascii_digit()))
                .unwrap_or(false)
            {
                phones.remove(0);
            }
            if phones.is_empty() {
                debug!("Skipping dictionary line without phones: {}", line);
                continue;
            }

            dict.add(word, phones);
        }

        dict
    }

    /// Build a dictionary from `(word, phones)` pairs
    pub fn from_entries<W, P, I>(entries: I) -> Self
    where
        W: AsRef<str>,
        P: IntoIterator,
        P::Item: Into<String>,
        I: IntoIterator<Item = (W, P)>,
    {
        let mut dict = Self::default();
        for (word, phones) in entries {
            dict.add(word.as_ref(), phones.into_iter().map(Into::into).collect());
        }
        dict
    }

    /// Append a pronunciation variant for a word
    pub fn add(&mut self, word: &str, phones: Pronunciation) {
        self.entries
            .entry(word.to_lowercase())
            .or_default()
            .push(phones);
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lexicon for CmuDict {
    fn pronunciations(&self, word: &str) -> Option<&[Pronunciation]> {
        self.entries.get(word).map(|v| v.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = ";;; # CMUdict  --  Major Version: 0.07
;;; comment line

PEA  P IY1
READ  R EH1 D
READ(2)  R IY1 D
tomato 1 T AH0 M EY1 T OW2
";

    #[test]
    fn test_parse_cmu_text() {
        let dict = CmuDict::from_cmu_text(SAMPLE);
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.pronounce("pea").unwrap(), &vec!["P", "IY1"]);
        assert_eq!(
            dict.pronounce("tomato").unwrap(),
            &vec!["T", "AH0", "M", "EY1", "T", "OW2"]
        );
    }

    #[test]
    fn test_variants_keep_file_order() {
        let dict = CmuDict::from_cmu_text(SAMPLE);
        let variants = dict.pronunciations("read").unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0], vec!["R", "EH1", "D"]);
        assert_eq!(variants[1], vec!["R", "IY1", "D"]);
    }

    #[test]
    fn test_parse_json() {
        let dict = CmuDict::from_json(r#"{"Pea": [["P", "IY1"]], "a": [["AH0"], ["EY1"]]}"#)
            .unwrap();
        assert_eq!(dict.pronounce("pea").unwrap(), &vec!["P", "IY1"]);
        assert_eq!(dict.pronounce("a").unwrap(), &vec!["AH0"]);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            CmuDict::from_json("not json"),
            Err(SynthError::Dictionary(_))
        ));
    }

    #[test]
    fn test_unknown_word() {
        let dict = CmuDict::from_entries([("pea", ["P", "IY1"])]);
        assert!(dict.pronounce("pod").is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmudict.dict");
        fs::write(&path, SAMPLE).unwrap();
        let dict = CmuDict::load(&path).unwrap();
        assert!(dict.pronounce("pea").is_some());

        assert!(CmuDict::load(dir.path().join("missing.dict")).is_err());
    }
}

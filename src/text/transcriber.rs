//! Word to phone transcription

use crate::options::ReverseMode;
use crate::text::letters::LETTER_PHONES;
use crate::text::lexicon::Lexicon;
use crate::text::normalize::normalize;
use crate::{Result, SynthError};
use log::debug;

/// Silence marker placed at both ends of every utterance
pub const SILENCE: &str = "PAU";

/// Flat phone labels for one utterance, silence markers included
pub type PhoneSequence = Vec<String>;

/// Remove stress digits from a phone label (`"IY1"` -> `"IY"`)
pub fn strip_stress(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Phones for spelling a token one character at a time
///
/// Letters and digits use their names from the built-in table; the
/// dictionary only covers other characters.
fn spell_token<L: Lexicon + ?Sized>(lexicon: &L, token: &str) -> Result<Vec<String>> {
    let mut phones = Vec::new();
    for ch in token.chars().filter(|c| c.is_alphanumeric()) {
        let name = ch.to_string();
        if let Some(letter) = LETTER_PHONES.get(&ch) {
            phones.extend(letter.iter().map(|p| p.to_string()));
        } else if let Some(pron) = lexicon.pronounce(&name) {
            phones.extend(pron.iter().cloned());
        } else {
            return Err(SynthError::UnknownWord(name));
        }
    }
    Ok(phones)
}

/// Transcribe normalized tokens into a phone sequence
///
/// Uses the first pronunciation variant of each word. With `spell` set every
/// token is read out letter by letter instead. `ReverseMode::Words` reverses
/// token order before lookup, `ReverseMode::Phones` reverses the finished
/// sequence including the silence markers.
///
/// Fails with [`SynthError::UnknownWord`] on the first token the lexicon does
/// not know.
pub fn transcribe<L: Lexicon + ?Sized>(
    lexicon: &L,
    tokens: &[String],
    spell: bool,
    reverse: Option<ReverseMode>,
) -> Result<PhoneSequence> {
    let mut ordered: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
    if reverse == Some(ReverseMode::Words) {
        ordered.reverse();
    }

    let mut phones = vec![SILENCE.to_string()];
    for token in ordered {
        let raw = if spell {
            spell_token(lexicon, token)?
        } else {
            lexicon
                .pronounce(token)
                .cloned()
                .ok_or_else(|| SynthError::UnknownWord(token.to_string()))?
        };
        phones.extend(raw.iter().map(|p| strip_stress(p)));
    }
    phones.push(SILENCE.to_string());

    if reverse == Some(ReverseMode::Phones) {
        phones.reverse();
    }

    debug!("Transcribed {} tokens into {} phones", tokens.len(), phones.len());
    Ok(phones)
}

/// One phrase on its way to becoming audio
#[derive(Debug, Clone)]
pub struct Utterance {
    phrase: String,
    phones: Option<PhoneSequence>,
}

impl Utterance {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            phones: None,
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Normalized word tokens of the phrase
    pub fn tokens(&self) -> Vec<String> {
        normalize(&self.phrase)
    }

    /// Transcribe the phrase and remember the result
    pub fn phone_sequence<L: Lexicon + ?Sized>(
        &mut self,
        lexicon: &L,
        spell: bool,
        reverse: Option<ReverseMode>,
    ) -> Result<&[String]> {
        let phones = transcribe(lexicon, &self.tokens(), spell, reverse)?;
        Ok(self.phones.insert(phones).as_slice())
    }

    /// Phones from the last successful transcription
    pub fn phones(&self) -> Option<&[String]> {
        self.phones.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::lexicon::CmuDict;

    fn dict() -> CmuDict {
        CmuDict::from_entries([
            ("pea", vec!["P", "IY1"]),
            ("pod", vec!["P", "AA1", "D"]),
            ("a", vec!["AH0"]),
            ("é", vec!["EY1"]),
        ])
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_strip_stress() {
        assert_eq!(strip_stress("IY1"), "IY");
        assert_eq!(strip_stress("AH0"), "AH");
        assert_eq!(strip_stress("P"), "P");
    }

    #[test]
    fn test_transcribe_adds_silence() {
        let phones = transcribe(&dict(), &tokens(&["pea"]), false, None).unwrap();
        assert_eq!(phones, vec!["PAU", "P", "IY", "PAU"]);
    }

    #[test]
    fn test_reverse_words() {
        let phones = transcribe(
            &dict(),
            &tokens(&["pea", "pod"]),
            false,
            Some(ReverseMode::Words),
        )
        .unwrap();
        assert_eq!(phones, vec!["PAU", "P", "AA", "D", "P", "IY", "PAU"]);
    }

    #[test]
    fn test_reverse_phones() {
        let phones = transcribe(
            &dict(),
            &tokens(&["pea", "pod"]),
            false,
            Some(ReverseMode::Phones),
        )
        .unwrap();
        assert_eq!(phones, vec!["PAU", "D", "AA", "P", "IY", "P", "PAU"]);
    }

    #[test]
    fn test_signal_reverse_does_not_touch_phones() {
        let phones = transcribe(&dict(), &tokens(&["pea"]), false, Some(ReverseMode::Signal))
            .unwrap();
        assert_eq!(phones, vec!["PAU", "P", "IY", "PAU"]);
    }

    #[test]
    fn test_unknown_word() {
        let result = transcribe(&dict(), &tokens(&["pea", "zzyzx"]), false, None);
        assert!(matches!(result, Err(SynthError::UnknownWord(w)) if w == "zzyzx"));
    }

    #[test]
    fn test_spell_uses_letter_names() {
        // the dictionary reads "a" as the article, spelling wants the name
        let phones = transcribe(&dict(), &tokens(&["ab"]), true, None).unwrap();
        assert_eq!(phones, vec!["PAU", "EY", "B", "IY", "PAU"]);
    }

    #[test]
    fn test_spell_falls_back_to_dictionary() {
        let phones = transcribe(&dict(), &tokens(&["é"]), true, None).unwrap();
        assert_eq!(phones, vec!["PAU", "EY", "PAU"]);

        let result = transcribe(&dict(), &tokens(&["ø"]), true, None);
        assert!(matches!(result, Err(SynthError::UnknownWord(w)) if w == "ø"));
    }

    #[test]
    fn test_spell_skips_punctuation() {
        let phones = transcribe(&dict(), &tokens(&["i'd"]), true, None).unwrap();
        assert_eq!(phones, vec!["PAU", "AY", "D", "IY", "PAU"]);
    }

    #[test]
    fn test_utterance_keeps_phones() {
        let mut utt = Utterance::new("Pea!");
        assert!(utt.phones().is_none());
        let phones = utt.phone_sequence(&dict(), false, None).unwrap().to_vec();
        assert_eq!(phones, vec!["PAU", "P", "IY", "PAU"]);
        assert_eq!(utt.phones().unwrap(), phones.as_slice());
        assert_eq!(utt.phrase(), "Pea!");
    }
}

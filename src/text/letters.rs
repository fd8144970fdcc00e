//! Built-in letter and digit pronunciations for spelling
//!
//! Spell mode reads each character by name. Most dictionaries carry entries
//! for single letters, but when one is missing we fall back to these ARPAbet
//! transcriptions of the English letter and digit names.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Character name pronunciations (stress marks omitted)
pub static LETTER_PHONES: Lazy<HashMap<char, &'static [&'static str]>> = Lazy::new(|| {
    let mut m: HashMap<char, &'static [&'static str]> = HashMap::new();
    m.insert('a', &["EY"]);
    m.insert('b', &["B", "IY"]);
    m.insert('c', &["S", "IY"]);
    m.insert('d', &["D", "IY"]);
    m.insert('e', &["IY"]);
    m.insert('f', &["EH", "F"]);
    m.insert('g', &["JH", "IY"]);
    m.insert('h', &["EY", "CH"]);
    m.insert('i', &["AY"]);
    m.insert('j', &["JH", "EY"]);
    m.insert('k', &["K", "EY"]);
    m.insert('l', &["EH", "L"]);
    m.insert('m', &["EH", "M"]);
    m.insert('n', &["EH", "N"]);
    m.insert('o', &["OW"]);
    m.insert('p', &["P", "IY"]);
    m.insert('q', &["K", "Y", "UW"]);
    m.insert('r', &["AA", "R"]);
    m.insert('s', &["EH", "S"]);
    m.insert('t', &["T", "IY"]);
    m.insert('u', &["Y", "UW"]);
    m.insert('v', &["V", "IY"]);
    m.insert('w', &["D", "AH", "B", "AH", "L", "Y", "UW"]);
    m.insert('x', &["EH", "K", "S"]);
    m.insert('y', &["W", "AY"]);
    m.insert('z', &["Z", "IY"]);
    m.insert('0', &["Z", "IH", "R", "OW"]);
    m.insert('1', &["W", "AH", "N"]);
    m.insert('2', &["T", "UW"]);
    m.insert('3', &["TH", "R", "IY"]);
    m.insert('4', &["F", "AO", "R"]);
    m.insert('5', &["F", "AY", "V"]);
    m.insert('6', &["S", "IH", "K", "S"]);
    m.insert('7', &["S", "EH", "V", "AH", "N"]);
    m.insert('8', &["EY", "T"]);
    m.insert('9', &["N", "AY", "N"]);
    m
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_letter_and_digit_has_a_name() {
        for ch in ('a'..='z').chain('0'..='9') {
            let phones = LETTER_PHONES.get(&ch).expect("missing character");
            assert!(!phones.is_empty());
        }
    }
}

//! Phrase normalization

use once_cell::sync::Lazy;
use regex::Regex;

/// Everything except word characters, whitespace, apostrophes and slashes
static STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s'/]").expect("valid regex"));

/// Split a phrase into lowercase word tokens
///
/// Punctuation other than `'` and `/` is removed from each token. Tokens left
/// empty by stripping are dropped.
pub fn normalize(phrase: &str) -> Vec<String> {
    phrase
        .split_whitespace()
        .map(|token| STRIP_RE.replace_all(&token.to_lowercase(), "").into_owned())
        .filter(|token| !token.is_empty())
        .collect()
}

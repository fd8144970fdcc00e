//! Phone sequence to diphone key conversion

/// Turn a phone sequence into the names of the diphones spanning it
///
/// `N` phones give `N - 1` keys of the form `"<phone>-<next phone>"`. Fewer
/// than two phones give no keys.
pub fn phones_to_diphones<S: AsRef<str>>(phones: &[S]) -> Vec<String> {
    phones
        .windows(2)
        .map(|pair| format!("{}-{}", pair[0].as_ref(), pair[1].as_ref()))
        .collect()
}

//! Text to phone conversion

pub mod letters;
pub mod lexicon;
pub mod normalize;
pub mod transcriber;

pub use lexicon::{CmuDict, Lexicon, Pronunciation};
pub use normalize::normalize;
pub use transcriber::{transcribe, PhoneSequence, Utterance, SILENCE};

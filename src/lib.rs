//! dsynth - diphone concatenation speech synthesizer
//!
//! Turns text into speech by transcribing it to phones, mapping each pair of
//! adjacent phones to a pre-recorded diphone unit and joining the units into
//! one waveform.

pub mod audio;
pub mod config;
pub mod diphone;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod synth;
pub mod text;

pub use error::{Result, SynthError};
pub use options::{ReverseMode, SynthOptions};
pub use pipeline::Pipeline;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "dsynth";

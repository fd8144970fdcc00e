//! Diphone units and sequencing

pub mod library;
pub mod sequencer;

pub use library::{DiphoneLibrary, DiphoneUnit};
pub use sequencer::phones_to_diphones;

//! Audio buffers, WAV I/O and playback

pub mod buffer;
pub mod playback;
pub mod wav;

pub use buffer::{parse_volume, volume_factor, AudioBuffer, AudioFormat, SampleWidth};
pub use playback::{AudioSink, CommandPlayer};
pub use wav::{read_wav, write_wav};

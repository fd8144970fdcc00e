//! WAV file reading and writing

use crate::audio::buffer::{AudioBuffer, AudioFormat, SampleWidth};
use crate::{Result, SynthError};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;
use std::io::{Read, Seek, Write};
use std::path::Path;

/// Read a mono integer PCM WAV file
pub fn read_wav(path: impl AsRef<Path>) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    decode(reader).map_err(|e| match e {
        SynthError::Format(msg) => SynthError::Format(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Decode WAV data from any reader
pub fn read_wav_from<R: Read>(source: R) -> Result<AudioBuffer> {
    decode(WavReader::new(source)?)
}

fn decode<R: Read>(mut reader: WavReader<R>) -> Result<AudioBuffer> {
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int {
        return Err(SynthError::Format(
            "floating point WAV data is not supported".to_string(),
        ));
    }
    if spec.channels != 1 {
        return Err(SynthError::Format(format!(
            "expected mono audio, found {} channels",
            spec.channels
        )));
    }
    let width = SampleWidth::from_bits(spec.bits_per_sample).ok_or_else(|| {
        SynthError::Format(format!(
            "unsupported sample width: {} bits",
            spec.bits_per_sample
        ))
    })?;

    let samples = reader
        .samples::<i32>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(AudioBuffer::from_samples(
        samples,
        AudioFormat::new(spec.sample_rate, width),
    ))
}

fn spec_for(format: AudioFormat) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: format.sample_rate,
        bits_per_sample: format.width.bits(),
        sample_format: SampleFormat::Int,
    }
}

/// Write a buffer to a WAV file at its own rate and width
pub fn write_wav(path: impl AsRef<Path>, audio: &AudioBuffer) -> Result<()> {
    let path = path.as_ref();
    debug!(
        "Writing {} samples ({} ms) to {:?}",
        audio.len(),
        audio.duration_ms(),
        path
    );
    let writer = WavWriter::create(path, spec_for(audio.format()))?;
    encode(writer, audio)
}

/// Encode a buffer as WAV into any seekable writer
pub fn write_wav_to<W: Write + Seek>(sink: W, audio: &AudioBuffer) -> Result<()> {
    encode(WavWriter::new(sink, spec_for(audio.format()))?, audio)
}

fn encode<W: Write + Seek>(mut writer: WavWriter<W>, audio: &AudioBuffer) -> Result<()> {
    for &sample in audio.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

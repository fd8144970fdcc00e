//! Integer sample buffers
//!
//! Every piece of audio that moves through the synthesizer is an
//! `AudioBuffer`: mono integer samples tagged with the rate and sample width
//! they were recorded at. Samples are held as `i32` regardless of width so a
//! single type covers 8, 16, 24 and 32 bit material; the width decides the
//! amplitude range values are clamped to.

use crate::{Result, SynthError};
use log::debug;

/// Signed integer sample width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleWidth {
    I8,
    I16,
    I24,
    I32,
}

impl SampleWidth {
    /// Map a WAV `bits_per_sample` value to a width
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(SampleWidth::I8),
            16 => Some(SampleWidth::I16),
            24 => Some(SampleWidth::I24),
            32 => Some(SampleWidth::I32),
            _ => None,
        }
    }

    pub fn bits(self) -> u16 {
        match self {
            SampleWidth::I8 => 8,
            SampleWidth::I16 => 16,
            SampleWidth::I24 => 24,
            SampleWidth::I32 => 32,
        }
    }

    /// Largest representable amplitude
    pub fn max_amplitude(self) -> i32 {
        match self {
            SampleWidth::I32 => i32::MAX,
            other => (1i32 << (other.bits() - 1)) - 1,
        }
    }

    /// Smallest representable amplitude
    pub fn min_amplitude(self) -> i32 {
        match self {
            SampleWidth::I32 => i32::MIN,
            other => -(1i32 << (other.bits() - 1)),
        }
    }

    /// Clamp a blended value into range and truncate it toward zero
    pub fn clamp_f64(self, value: f64) -> i32 {
        let clamped = value.clamp(self.min_amplitude() as f64, self.max_amplitude() as f64);
        clamped.trunc() as i32
    }
}

/// Rate and width shared by every buffer in one synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    /// Samples per second
    pub sample_rate: u32,
    pub width: SampleWidth,
}

impl AudioFormat {
    pub fn new(sample_rate: u32, width: SampleWidth) -> Self {
        Self { sample_rate, width }
    }

    /// Number of samples spanning `seconds`, rounded to the nearest sample
    pub fn samples_for(&self, seconds: f64) -> usize {
        (self.sample_rate as f64 * seconds).round().max(0.0) as usize
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::new(16_000, SampleWidth::I16)
    }
}

/// Mono integer PCM audio
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<i32>,
    format: AudioFormat,
}

impl AudioBuffer {
    /// Create an empty buffer in the given format
    pub fn empty(format: AudioFormat) -> Self {
        Self {
            samples: Vec::new(),
            format,
        }
    }

    /// Wrap existing samples
    ///
    /// Samples outside the width's range are clamped.
    pub fn from_samples(samples: Vec<i32>, format: AudioFormat) -> Self {
        let (lo, hi) = (format.width.min_amplitude(), format.width.max_amplitude());
        let samples = samples.into_iter().map(|s| s.clamp(lo, hi)).collect();
        Self { samples, format }
    }

    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        if self.format.sample_rate == 0 {
            return 0;
        }
        (self.samples.len() as u128 * 1000 / self.format.sample_rate as u128) as u64
    }

    /// Append a copy of another buffer's samples
    ///
    /// Both buffers must share rate and width.
    pub fn append(&mut self, other: &AudioBuffer) -> Result<()> {
        if other.format != self.format {
            return Err(SynthError::Format(format!(
                "cannot join {:?} audio onto {:?} audio",
                other.format, self.format
            )));
        }
        self.samples.extend_from_slice(&other.samples);
        Ok(())
    }

    /// Reverse sample order in place
    pub fn reverse(&mut self) {
        self.samples.reverse();
    }

    /// Multiply every sample by `factor`
    ///
    /// Results are rounded to the nearest integer and clamped to the width's
    /// amplitude range. The factor must be finite and non-negative.
    pub fn rescale(&mut self, factor: f64) -> Result<()> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(SynthError::Format(format!(
                "scaling factor must be a finite non-negative number, got {}",
                factor
            )));
        }
        debug!("Rescaling {} samples by {:.3}", self.samples.len(), factor);

        let width = self.format.width;
        for sample in self.samples.iter_mut() {
            let scaled = (*sample as f64 * factor).round();
            *sample = width.clamp_f64(scaled);
        }
        Ok(())
    }
}

/// Convert a 0-100 volume setting into a scaling factor in `[0, 1]`
pub fn volume_factor(volume: i64) -> Result<f64> {
    if !(0..=100).contains(&volume) {
        return Err(SynthError::InvalidVolume(volume.to_string()));
    }
    Ok(volume as f64 / 100.0)
}

/// Parse a user-supplied volume string and convert it to a factor
pub fn parse_volume(raw: &str) -> Result<f64> {
    let volume: i64 = raw
        .trim()
        .parse()
        .map_err(|_| SynthError::InvalidVolume(raw.to_string()))?;
    volume_factor(volume)
}

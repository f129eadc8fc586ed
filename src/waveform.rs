//! Decoding of waveform sections into baseline-corrected signals.

use thiserror::Error;
use zerocopy::{FromBytes, byteorder::little_endian::I16};

use crate::Config;

/// A section that cannot be read as samples.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A trailing byte is left over after the last whole sample.
    #[error("Section length ({0}) is not a whole number of samples.")]
    OddLength(usize),
}

/// Unit of decoded amplitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    /// Least-significant-bit counts of the recorder's converter.
    RawCount,
    /// Physical amplitude, converted with a configured resolution.
    Millivolt,
}

impl Unit {
    /// Short label for axis titles and column headers.
    pub fn label(&self) -> &'static str {
        match self {
            Unit::RawCount => "LSB",
            Unit::Millivolt => "mV",
        }
    }
}

/// A single-lead signal with its median removed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedSignal {
    samples: Vec<f64>,
    sample_rate: f64,
    unit: Unit,
}

impl DecodedSignal {
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time in seconds of the sample at an index.
    pub fn time_at(&self, i: usize) -> f64 {
        i as f64 / self.sample_rate
    }

    /// Length of the recording in seconds.
    pub fn duration(&self) -> f64 {
        self.time_at(self.samples.len())
    }

    /// Time and amplitude pairs, in sample order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &v)| (self.time_at(i), v))
    }

    /// Samples within the first `seconds` of the recording.
    pub fn head(&self, seconds: f64) -> &[f64] {
        let n = (seconds * self.sample_rate).max(0.0) as usize;
        &self.samples[..n.min(self.samples.len())]
    }

    /// Consecutive segments of `seconds_per_row` each, at most `rows` of them.
    ///
    /// The last segment may be shorter, and fewer segments are returned when
    /// the recording runs out.
    pub fn rows(&self, seconds_per_row: f64, rows: usize) -> impl Iterator<Item = &[f64]> {
        let per_row = ((seconds_per_row * self.sample_rate).round() as usize).max(1);
        self.samples.chunks(per_row).take(rows)
    }
}

/// Decode a section of little-endian 16-bit samples.
///
/// The median is subtracted from every sample. When the configuration sets a
/// converter resolution, samples are then scaled to millivolts.
pub fn decode(r: &[u8], config: &Config) -> Result<DecodedSignal, DecodeError> {
    let raw = <[I16]>::ref_from_bytes(r).map_err(|_| DecodeError::OddLength(r.len()))?;

    let mut samples: Vec<f64> = raw.iter().map(|s| f64::from(s.get())).collect();

    if let Some(baseline) = median(&samples) {
        samples.iter_mut().for_each(|s| *s -= baseline);
    }

    let unit = match config.scale() {
        Some(scale) => {
            samples.iter_mut().for_each(|s| *s *= scale);
            Unit::Millivolt
        }
        None => Unit::RawCount,
    };

    Ok(DecodedSignal {
        samples,
        sample_rate: config.sample_rate,
        unit,
    })
}

/// The middle value, or the mean of the two middle values for an even count.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;

    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

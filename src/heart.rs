//! Heart-rate estimation by three independent peak analyses.
//!
//! Any single peak detector is fragile against noise, so the raw signal, a
//! band-limited copy, and a smoothed copy are analysed separately with the same
//! detector (see [`peaks`]). Every method's result is reported, alongside the
//! mean of those that succeeded.

pub mod filter;
pub mod peaks;

use core::fmt;

use log::warn;

use crate::waveform::DecodedSignal;

/// Pass band of the band-limited method, in Hz.
pub const PASS_BAND: (f64, f64) = (5.0, 15.0);

/// Width of the smoothing window, in seconds.
pub const SMOOTHING_WINDOW: f64 = 0.10;

/// Narrowest smoothing window, in samples.
pub const MIN_SMOOTHING_WIDTH: usize = 3;

/// An estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Peaks of the signal as decoded.
    Raw,
    /// Peaks after a zero-phase band-pass over [`PASS_BAND`].
    BandPass,
    /// Peaks after a centered moving average over [`SMOOTHING_WINDOW`].
    Smoothed,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Raw, Method::BandPass, Method::Smoothed];

    pub fn name(&self) -> &'static str {
        match self {
            Method::Raw => "raw",
            Method::BandPass => "bandpass",
            Method::Smoothed => "smoothed",
        }
    }

    /// Run this method over a signal.
    pub fn estimate(&self, samples: &[f64], sample_rate: f64) -> Option<f64> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return None;
        }

        let prepared = match self {
            Method::Raw => None,
            Method::BandPass => {
                let (low, high) = PASS_BAND;
                Some(filter::band_pass(samples, low, high, sample_rate)?)
            }
            Method::Smoothed => {
                let width = ((SMOOTHING_WINDOW * sample_rate).round() as usize)
                    .max(MIN_SMOOTHING_WIDTH);
                Some(filter::moving_average(samples, width))
            }
        };

        let peaks = peaks::detect(prepared.as_deref().unwrap_or(samples), sample_rate);

        peaks::beats_per_minute(&peaks, sample_rate)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The outcome of one method.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodEstimate {
    pub method: Method,
    /// Beats per minute, or `None` if fewer than two beats were found.
    pub bpm: Option<f64>,
}

/// Heart rate of one signal, by method and combined.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeartRateEstimate {
    pub per_method: [MethodEstimate; 3],
    /// Mean of the methods that produced an estimate.
    pub combined: Option<f64>,
}

impl HeartRateEstimate {
    /// Combine the outcomes of individual methods.
    pub fn from_methods(per_method: [MethodEstimate; 3]) -> Self {
        let found: Vec<f64> = per_method.iter().filter_map(|m| m.bpm).collect();

        let combined = match found.len() {
            0 => None,
            n => Some(found.iter().sum::<f64>() / n as f64),
        };

        Self {
            per_method,
            combined,
        }
    }

    /// The outcome of a method.
    pub fn get(&self, method: Method) -> Option<f64> {
        self.per_method
            .iter()
            .find(|m| m.method == method)
            .and_then(|m| m.bpm)
    }

    /// Whether every method failed.
    pub fn is_unavailable(&self) -> bool {
        self.combined.is_none()
    }
}

impl fmt::Display for HeartRateEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.combined {
            Some(bpm) => write!(f, "Heart Rate: {bpm:.1} BPM")?,
            None => write!(f, "Heart Rate: unavailable")?,
        }

        for MethodEstimate { method, bpm } in &self.per_method {
            match bpm {
                Some(bpm) => write!(f, " | {method}: {bpm:.1}")?,
                None => write!(f, " | {method}: -")?,
            }
        }

        Ok(())
    }
}

/// Estimate the heart rate of a decoded signal.
pub fn estimate(signal: &DecodedSignal) -> HeartRateEstimate {
    estimate_samples(signal.samples(), signal.sample_rate())
}

/// Estimate the heart rate of samples taken at `sample_rate` Hz.
pub fn estimate_samples(samples: &[f64], sample_rate: f64) -> HeartRateEstimate {
    let per_method = Method::ALL.map(|method| MethodEstimate {
        method,
        bpm: method.estimate(samples, sample_rate),
    });

    let estimate = HeartRateEstimate::from_methods(per_method);

    if estimate.is_unavailable() {
        warn!("No method produced a heart-rate estimate.");
    }

    estimate
}

//! Per-invocation configuration.

use crate::sans::entry::LEADS_DATA;

/// Immutable settings threaded into each pipeline invocation.
///
/// A single value may be shared by any number of concurrent invocations; the
/// crate holds no process-wide state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Samples per second of the waveform section. Never inferred from data.
    pub sample_rate: f64,
    /// ADC resolution. When set, samples are converted to millivolts.
    pub microvolts_per_lsb: Option<f64>,
    /// Identifier of the section holding the waveform.
    pub section: u16,
    /// Required byte length of the waveform section, if known for the device.
    pub section_length: Option<usize>,
    /// Empirical bounds used while locating and recovering the directory.
    pub limits: Limits,
}

impl Config {
    /// Settings for single-lead recorders storing 4512 uncompressed samples.
    pub fn one_lead() -> Self {
        Self::default().with_section_length(Some(9024))
    }

    pub fn with_sample_rate(self, sample_rate: f64) -> Self {
        Self {
            sample_rate,
            ..self
        }
    }

    pub fn with_microvolts_per_lsb(self, microvolts_per_lsb: Option<f64>) -> Self {
        Self {
            microvolts_per_lsb,
            ..self
        }
    }

    pub fn with_section(self, section: u16) -> Self {
        Self { section, ..self }
    }

    pub fn with_section_length(self, section_length: Option<usize>) -> Self {
        Self {
            section_length,
            ..self
        }
    }

    pub fn with_limits(self, limits: Limits) -> Self {
        Self { limits, ..self }
    }

    /// Factor converting raw counts to millivolts, if a resolution is set.
    pub fn scale(&self) -> Option<f64> {
        self.microvolts_per_lsb.map(|uv| uv / 1000.0)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: 150.0,
            microvolts_per_lsb: None,
            section: LEADS_DATA,
            section_length: None,
            limits: Limits::default(),
        }
    }
}

/// Search bounds tuned to one device family.
///
/// These are not derived from the file format, and may need loosening for
/// recorders that place their directory further into the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// Number of leading bytes searched for the magic token.
    pub magic_window: usize,
    /// Number of leading bytes swept by the fallback scan.
    pub scan_window: usize,
    /// Step between fallback scan positions when no entry is accepted.
    pub scan_stride: usize,
    /// Exclusive upper bound on plausible section identifiers.
    pub max_section_id: u16,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            magic_window: 1024,
            scan_window: 512,
            scan_stride: 2,
            max_section_id: 100,
        }
    }
}

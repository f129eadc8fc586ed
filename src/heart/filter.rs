//! Zero-phase filters applied before peak detection.

use std::f64::consts::{PI, SQRT_2};

/// A second-order Butterworth section in direct form I.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    b: [f64; 3],
    /// Feedback coefficients, with the leading `1.0` omitted.
    a: [f64; 2],
}

impl Biquad {
    /// Low-pass section with its -3 dB point at `cutoff` Hz.
    pub fn low_pass(cutoff: f64, sample_rate: f64) -> Self {
        let (k2, norm, a) = Self::prewarp(cutoff, sample_rate);
        let b0 = k2 * norm;

        Self {
            b: [b0, 2.0 * b0, b0],
            a,
        }
    }

    /// High-pass section with its -3 dB point at `cutoff` Hz.
    pub fn high_pass(cutoff: f64, sample_rate: f64) -> Self {
        let (_, norm, a) = Self::prewarp(cutoff, sample_rate);

        Self {
            b: [norm, -2.0 * norm, norm],
            a,
        }
    }

    fn prewarp(cutoff: f64, sample_rate: f64) -> (f64, f64, [f64; 2]) {
        let k = (PI * cutoff / sample_rate).tan();
        let k2 = k * k;
        let norm = 1.0 / (1.0 + SQRT_2 * k + k2);

        (k2, norm, [2.0 * (k2 - 1.0) * norm, (1.0 - SQRT_2 * k + k2) * norm])
    }

    /// Gain for a constant input.
    fn dc_gain(&self) -> f64 {
        let [b0, b1, b2] = self.b;
        let [a1, a2] = self.a;

        (b0 + b1 + b2) / (1.0 + a1 + a2)
    }

    /// Filter a signal, starting from the steady state of its first sample.
    pub fn apply(&self, x: &[f64]) -> Vec<f64> {
        let [b0, b1, b2] = self.b;
        let [a1, a2] = self.a;

        let Some(&first) = x.first() else {
            return Vec::new();
        };

        let (mut x1, mut x2) = (first, first);
        let (mut y1, mut y2) = (first * self.dc_gain(), first * self.dc_gain());

        x.iter()
            .map(|&x0| {
                let y0 = b0 * x0 + b1 * x1 + b2 * x2 - a1 * y1 - a2 * y2;
                (x2, x1) = (x1, x0);
                (y2, y1) = (y1, y0);
                y0
            })
            .collect()
    }
}

/// Run a cascade forward, then backward, cancelling its phase delay.
///
/// Before each pass the input is extended by `pad` samples at both ends
/// (at most one less than its length) with an odd reflection about the edge
/// samples, and the extension is trimmed from the output.
pub fn filtfilt(sections: &[Biquad], x: &[f64], pad: usize) -> Vec<f64> {
    let pass = |x: &[f64]| {
        let pad = pad.min(x.len().saturating_sub(1));
        let padded = sections.iter().fold(reflect(x, pad), |x, s| s.apply(&x));

        let mut y = padded[pad..pad + x.len()].to_vec();
        y.reverse();
        y
    };

    pass(&pass(x))
}

/// Extend a signal by `pad` samples at each end, mirroring it through its
/// first and last samples.
///
/// `pad` must be less than the signal length.
fn reflect(x: &[f64], pad: usize) -> Vec<f64> {
    let (Some(&first), Some(&last)) = (x.first(), x.last()) else {
        return Vec::new();
    };

    let n = x.len();
    let before = x[1..=pad].iter().rev().map(|v| 2.0 * first - v);
    let after = x[n - 1 - pad..n - 1].iter().rev().map(|v| 2.0 * last - v);

    before.chain(x.iter().copied()).chain(after).collect()
}

/// Zero-phase band-pass between `low` and `high` Hz.
///
/// Each pass is padded by one period of `low`, which covers the settling
/// time of the high-pass section.
///
/// Returns `None` unless `0 < low < high < sample_rate / 2`.
pub fn band_pass(x: &[f64], low: f64, high: f64, sample_rate: f64) -> Option<Vec<f64>> {
    if !(0.0 < low && low < high && high < sample_rate / 2.0) {
        return None;
    }

    let sections = [
        Biquad::high_pass(low, sample_rate),
        Biquad::low_pass(high, sample_rate),
    ];

    let pad = (sample_rate / low).ceil() as usize;

    Some(filtfilt(&sections, x, pad))
}

/// Centered moving average over `width` samples.
///
/// Near the ends, only the samples inside the signal are averaged.
pub fn moving_average(x: &[f64], width: usize) -> Vec<f64> {
    let width = width.max(1);
    let before = width / 2;
    let after = width - 1 - before;

    let sums: Vec<f64> = core::iter::once(0.0)
        .chain(x.iter().scan(0.0, |total, v| {
            *total += v;
            Some(*total)
        }))
        .collect();

    (0..x.len())
        .map(|i| {
            let start = i.saturating_sub(before);
            let end = (i + after + 1).min(x.len());
            (sums[end] - sums[start]) / (end - start) as f64
        })
        .collect()
}

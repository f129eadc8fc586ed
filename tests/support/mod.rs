#![allow(dead_code)]

use std::f64::consts::PI;

use scp_waveform::sans::magic::MAGIC;

/// Wire layout of one directory entry.
pub fn entry(id: u16, length: u32, offset: u32) -> Vec<u8> {
    let mut bytes = id.to_le_bytes().to_vec();
    bytes.extend_from_slice(&length.to_le_bytes());
    bytes.extend_from_slice(&offset.to_le_bytes());
    bytes
}

/// A file with `padding` zero bytes, the magic token, a strict directory, and
/// the section payloads laid out back to back.
///
/// `declared` overrides the entry count written in the directory header.
pub fn file_with_count(padding: usize, sections: &[(u16, Vec<u8>)], declared: u32) -> Vec<u8> {
    let count = sections.len();
    let directory_length = 8 + 10 * count;
    let mut offset = padding + MAGIC.len() + directory_length;

    let mut bytes = vec![0; padding];
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&(directory_length as u32).to_le_bytes());
    bytes.extend_from_slice(&declared.to_le_bytes());

    for (id, payload) in sections {
        bytes.extend(entry(*id, payload.len() as u32, offset as u32));
        offset += payload.len();
    }

    for (_, payload) in sections {
        bytes.extend_from_slice(payload);
    }

    bytes
}

/// A file with a well-formed strict directory.
pub fn file(padding: usize, sections: &[(u16, Vec<u8>)]) -> Vec<u8> {
    file_with_count(padding, sections, sections.len() as u32)
}

/// Little-endian 16-bit sample bytes.
pub fn sample_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// The positive half of a sinusoid, zero elsewhere: one lobe per cycle.
pub fn half_wave(frequency: f64, sample_rate: f64, n: usize, amplitude: f64) -> Vec<i16> {
    (0..n)
        .map(|i| {
            let v = (2.0 * PI * frequency * i as f64 / sample_rate).sin();
            (amplitude * v.max(0.0)).round() as i16
        })
        .collect()
}

/// A sinusoid of `n` samples starting at phase zero.
pub fn sinusoid(frequency: f64, sample_rate: f64, n: usize, amplitude: f64) -> Vec<f64> {
    (0..n)
        .map(|i| amplitude * (2.0 * PI * frequency * i as f64 / sample_rate).sin())
        .collect()
}

/// Narrow triangular pulses, one per `interval` seconds, starting at sample
/// 100.
pub fn pulse_train(sample_rate: f64, seconds: f64, interval: f64) -> Vec<f64> {
    let n = (sample_rate * seconds) as usize;
    let step = (interval * sample_rate) as usize;
    let mut signal = vec![0.0; n];

    for start in (100..n).step_by(step) {
        for k in 0..12 {
            if let Some(v) = signal.get_mut(start + k) {
                *v = if k < 6 { k as f64 / 5.0 } else { (11 - k) as f64 / 5.0 };
            }
        }
    }

    signal
}

/// A one-lead recording: 4512 samples of a 1 Hz half-wave at 150 Hz.
pub fn one_lead_samples() -> Vec<i16> {
    half_wave(1.0, 150.0, 4512, 1000.0)
}

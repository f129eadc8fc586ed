mod support;

use scp_waveform::{
    Config,
    waveform::{DecodeError, Unit, decode, median},
};

use support::{one_lead_samples, sample_bytes};

#[test]
fn decodes_little_endian_samples_around_median() {
    let bytes = sample_bytes(&[10, -20, 30, 40, 50]);
    let signal = decode(&bytes, &Config::default()).unwrap();

    assert_eq!(signal.samples(), &[-20.0, -50.0, 0.0, 10.0, 20.0]);
    assert_eq!(signal.unit(), Unit::RawCount);
    assert_eq!(signal.unit().label(), "LSB");
    assert_eq!(signal.sample_rate(), 150.0);
}

#[test]
fn median_of_corrected_signal_is_zero() {
    let inputs: [&[i16]; 4] = [
        &[1, 2, 3, 4],
        &[-32768, 32767, 0, 5, 7, 9, -3],
        &[100; 10],
        &[3, -1, 4, -1, 5, -9, 2, 6],
    ];

    for samples in inputs {
        let signal = decode(&sample_bytes(samples), &Config::default()).unwrap();
        assert_eq!(median(signal.samples()), Some(0.0), "{samples:?}");
    }

    let signal = decode(&sample_bytes(&one_lead_samples()), &Config::default()).unwrap();
    assert_eq!(median(signal.samples()), Some(0.0));
}

#[test]
fn decoding_is_deterministic() {
    let bytes = sample_bytes(&one_lead_samples());
    let config = Config::default();

    let first = decode(&bytes, &config).unwrap();
    let second = decode(&bytes, &config).unwrap();

    let bits = |s: &[f64]| s.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(first.samples()), bits(second.samples()));
}

#[test]
fn scales_to_millivolts_when_resolution_is_known() {
    let bytes = sample_bytes(&[0, 200, 400]);
    let config = Config::default().with_microvolts_per_lsb(Some(5.0));
    let signal = decode(&bytes, &config).unwrap();

    assert_eq!(signal.unit(), Unit::Millivolt);
    assert_eq!(signal.unit().label(), "mV");
    assert_eq!(signal.samples(), &[-1.0, 0.0, 1.0]);
}

#[test]
fn rejects_odd_length() {
    assert_eq!(
        decode(&[1, 2, 3], &Config::default()),
        Err(DecodeError::OddLength(3))
    );
}

#[test]
fn empty_section_decodes_to_empty_signal() {
    let signal = decode(&[], &Config::default()).unwrap();
    assert!(signal.is_empty());
    assert_eq!(signal.duration(), 0.0);
}

#[test]
fn time_axis_follows_configured_rate() {
    let bytes = sample_bytes(&one_lead_samples());
    let config = Config::default().with_sample_rate(500.0);
    let signal = decode(&bytes, &config).unwrap();

    assert_eq!(signal.len(), 4512);
    assert_eq!(signal.time_at(500), 1.0);
    assert_eq!(signal.duration(), 9.024);

    let points: Vec<(f64, f64)> = signal.points().take(2).collect();
    assert_eq!(points[1].0, 0.002);
    assert_eq!(points[1].1, signal.samples()[1]);
}

#[test]
fn preview_and_rows_segment_the_recording() {
    let bytes = sample_bytes(&one_lead_samples());
    let signal = decode(&bytes, &Config::default()).unwrap();

    assert_eq!(signal.head(10.0).len(), 1500);
    assert_eq!(signal.head(60.0).len(), 4512);

    let rows: Vec<&[f64]> = signal.rows(10.0, 3).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].len(), 1500);
    assert_eq!(rows[2].len(), 1500);

    let rows: Vec<&[f64]> = signal.rows(20.0, 3).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].len(), 1512);
}

mod support;

use csv::{ReaderBuilder, Writer};
use scp_waveform::{Config, avec::decode_slice};

use support::{file, one_lead_samples, sample_bytes};

#[test]
fn points_export_as_time_amplitude_rows() {
    let bytes = file(0, &[(6, sample_bytes(&one_lead_samples()))]);
    let analysis = decode_slice(&bytes, &Config::one_lead()).unwrap();
    let signal = &analysis.signal;

    let mut writer = Writer::from_writer(vec![]);
    writer.write_record(["time", signal.unit().label()]).unwrap();
    for (t, v) in signal.points() {
        writer
            .write_record([format!("{t:.6}"), format!("{v:.6}")])
            .unwrap();
    }
    let data = writer.into_inner().unwrap();

    let mut reader = ReaderBuilder::new().from_reader(data.as_slice());
    assert_eq!(reader.headers().unwrap(), vec!["time", "LSB"]);

    let rows: Vec<(f64, f64)> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].parse().unwrap(), r[1].parse().unwrap())
        })
        .collect();

    assert_eq!(rows.len(), 4512);
    assert_eq!(rows[0], (0.0, 0.0));
    assert_eq!(rows[150].0, 1.0);
    assert_eq!(rows[37].1, 1000.0);
}

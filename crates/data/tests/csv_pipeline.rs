use insti_signal_core::{PipelineError, SignalClass, Timeframe};
use insti_signal_data::{export_signals, CsvStorage, ExportFormat, IngestError, EXPORT_COLUMNS};
use insti_signal_signals::process_bars;
use std::fmt::Write as _;
use std::io::Write;

fn sample_csv(rows: usize, with_dxy: bool) -> String {
    let mut csv = String::from(if with_dxy {
        "time,open,high,low,close,volume,dxy\n"
    } else {
        "time,open,high,low,close,volume\n"
    });
    // Written newest first to exercise sorting.
    for i in (0..rows).rev() {
        let minutes = i * 5;
        let open = 100.0 + (i % 7) as f64 * 0.3;
        let close = open + if i % 3 == 0 { -0.4 } else { 0.5 };
        let high = open.max(close) + 0.6;
        let low = open.min(close) - 0.6;
        let volume = 1_000 + (i % 5) * 250;
        write!(
            csv,
            "2024-03-04 {:02}:{:02}:00,{open},{high},{low},{close},{volume}",
            13 + minutes / 60,
            minutes % 60
        )
        .unwrap();
        if with_dxy {
            write!(csv, ",{}", 103.0 + i as f64 * 0.01).unwrap();
        }
        csv.push('\n');
    }
    csv
}

fn temp_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn csv_file_flows_through_pipeline_and_export() {
    let input = temp_csv(&sample_csv(40, true));
    let raw = CsvStorage::read_bars(input.path()).unwrap();
    assert_eq!(raw.len(), 40);

    let processed = process_bars(&raw, Timeframe::M5).unwrap();
    assert!(processed.windows(2).all(|w| w[0].time < w[1].time));
    // 13:00-16:15 UTC is New York session.
    assert!(processed.iter().all(|b| b.session_index == 1.0));
    assert!(processed[12..].iter().any(|b| b.dxy_delta != 0.0));

    let dir = tempfile::tempdir().unwrap();
    let csv_out = dir.path().join("out_signals.csv");
    export_signals(&csv_out, &processed, ExportFormat::Csv).unwrap();

    let mut reader = csv::Reader::from_path(&csv_out).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, EXPORT_COLUMNS);
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 40);
    assert_eq!(&rows[0][0], "2024-03-04T13:00:00Z");
    assert!(["BUY", "SELL", "NEUTRAL"].contains(&&rows[0][12]));

    let json_out = dir.path().join("out_signals.json");
    export_signals(&json_out, &processed, ExportFormat::Json).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_out).unwrap()).unwrap();
    let array = parsed.as_array().unwrap();
    assert_eq!(array.len(), 40);
    assert!(array[0].get("dV").is_some());
}

#[test]
fn exported_csv_round_trips_signal_classes() {
    let raw = CsvStorage::read_bars_from(sample_csv(25, false).as_bytes()).unwrap();
    let processed = process_bars(&raw, Timeframe::H1).unwrap();

    let mut buf = Vec::new();
    CsvStorage::write_signals_to(&mut buf, &processed).unwrap();

    let mut reader = csv::Reader::from_reader(buf.as_slice());
    for (record, bar) in reader.records().zip(&processed) {
        let record = record.unwrap();
        let class = match &record[12] {
            "BUY" => SignalClass::Buy,
            "SELL" => SignalClass::Sell,
            _ => SignalClass::Neutral,
        };
        assert_eq!(class, bar.signal_class);
        let signal: f64 = record[11].parse().unwrap();
        assert_eq!(signal, bar.institution_signal);
        assert_eq!(record[6].parse::<f64>().unwrap(), 0.0);
    }
}

#[test]
fn malformed_time_in_file_fails_the_batch() {
    let mut csv = sample_csv(10, false);
    csv.push_str("not-a-date,1,2,0.5,1.5,100\n");
    let raw = CsvStorage::read_bars_from(csv.as_bytes()).unwrap();

    let err = process_bars(&raw, Timeframe::M5).unwrap_err();
    assert_eq!(
        err,
        PipelineError::InvalidTimeFormat {
            raw: "not-a-date".to_string()
        }
    );
}

#[test]
fn header_only_file_is_empty_input() {
    let raw = CsvStorage::read_bars_from("time,open,high,low,close,volume\n".as_bytes()).unwrap();
    assert!(raw.is_empty());
    assert_eq!(
        process_bars(&raw, Timeframe::M5).unwrap_err(),
        PipelineError::EmptyInput
    );
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = CsvStorage::read_bars("/no/such/bars.csv").unwrap_err();
    assert!(matches!(err, IngestError::Open { .. }));
    assert!(err.to_string().contains("/no/such/bars.csv"));
}

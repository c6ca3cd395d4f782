use crate::error::{IngestError, REQUIRED_COLUMNS};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use insti_signal_core::{BarTime, ProcessedBar, RawBar};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Column order of exported signal files.
pub const EXPORT_COLUMNS: [&str; 13] = [
    "time",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "dxy_delta",
    "dV",
    "dP",
    "session_index",
    "liq_trap",
    "institution_signal",
    "signal_class",
];

pub struct CsvStorage;

/// Positions of the known columns within a header row.
struct ColumnMap {
    required: [usize; 6],
    dxy: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, IngestError> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| names.iter().position(|n| n == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(c).is_none())
            .map(|c| (*c).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns { missing });
        }

        let mut required = [0; 6];
        for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = find(name).unwrap_or_default();
        }

        Ok(Self {
            required,
            dxy: find("dxy"),
        })
    }
}

impl CsvStorage {
    /// Reads raw bars from a CSV file with a header row.
    ///
    /// Format: `time,open,high,low,close,volume[,dxy]` in any column order,
    /// header names case-insensitive. Extra columns are ignored.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, a required column is
    /// missing, or a numeric cell is invalid.
    pub fn read_bars(path: impl AsRef<Path>) -> Result<Vec<RawBar>, IngestError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| IngestError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let bars = Self::read_bars_from(file)?;
        tracing::info!(path = %path.display(), bars = bars.len(), "Loaded bars from CSV");
        Ok(bars)
    }

    /// Reads raw bars from any CSV source.
    ///
    /// # Errors
    /// See [`CsvStorage::read_bars`].
    pub fn read_bars_from<R: Read>(source: R) -> Result<Vec<RawBar>, IngestError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        let columns = ColumnMap::from_headers(reader.headers()?)?;
        if columns.dxy.is_none() {
            tracing::debug!("No dxy column, cross-asset delta will be zero");
        }

        let mut bars = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            bars.push(parse_record(&record, &columns)?);
        }

        Ok(bars)
    }

    /// Writes processed bars to a CSV file.
    ///
    /// Format: see [`EXPORT_COLUMNS`]; time is RFC 3339 UTC.
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_signals(path: impl AsRef<Path>, bars: &[ProcessedBar]) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        Self::write_signals_to(file, bars)
            .with_context(|| format!("Failed to write CSV file: {}", path.display()))
    }

    /// Writes processed bars as CSV to any sink.
    ///
    /// # Errors
    /// Returns error if serialization or the underlying write fails.
    pub fn write_signals_to<W: Write>(sink: W, bars: &[ProcessedBar]) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);

        writer.write_record(EXPORT_COLUMNS)?;
        for bar in bars {
            writer.serialize(bar)?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn parse_record(record: &StringRecord, columns: &ColumnMap) -> Result<RawBar, IngestError> {
    let line = record.position().map_or(0, csv::Position::line);
    let cell = |idx: usize| record.get(idx).unwrap_or("");
    let number = |slot: usize| -> Result<f64, IngestError> {
        let raw = cell(columns.required[slot]);
        parse_finite(raw).ok_or_else(|| IngestError::InvalidNumber {
            line,
            column: REQUIRED_COLUMNS[slot],
            value: raw.to_string(),
        })
    };

    let dxy = match columns.dxy.map(cell) {
        None | Some("") => None,
        Some(raw) => Some(parse_finite(raw).ok_or_else(|| IngestError::InvalidNumber {
            line,
            column: "dxy",
            value: raw.to_string(),
        })?),
    };

    Ok(RawBar {
        time: parse_time_cell(cell(columns.required[0])),
        open: number(1)?,
        high: number(2)?,
        low: number(3)?,
        close: number(4)?,
        volume: number(5)?,
        dxy,
    })
}

/// Plain numbers are epoch seconds; anything else is left for the pipeline
/// to parse as a calendar timestamp.
fn parse_time_cell(raw: &str) -> BarTime {
    match parse_finite(raw) {
        Some(secs) => BarTime::Epoch(secs),
        None => BarTime::Text(raw.to_string()),
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_required_and_optional_columns() {
        let csv = "Time,Open,High,Low,Close,Volume,DXY\n\
                   2024-01-01T00:00:00Z,1.0,2.0,0.5,1.5,100,104.1\n\
                   1704067500,1.5,2.5,1.0,2.0,200,\n";
        let bars = CsvStorage::read_bars_from(csv.as_bytes()).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].time, BarTime::Text("2024-01-01T00:00:00Z".to_string()));
        assert_eq!(bars[0].dxy, Some(104.1));
        assert_eq!(bars[1].time, BarTime::Epoch(1_704_067_500.0));
        assert_eq!(bars[1].dxy, None);
        assert_eq!(bars[1].volume, 200.0);
    }

    #[test]
    fn column_order_and_extra_columns_do_not_matter() {
        let csv = "symbol, volume ,close,low,high,open,time\nBTC,10,4,1,5,2,1704067200\n";
        let bars = CsvStorage::read_bars_from(csv.as_bytes()).unwrap();

        assert_eq!(bars[0].open, 2.0);
        assert_eq!(bars[0].high, 5.0);
        assert_eq!(bars[0].low, 1.0);
        assert_eq!(bars[0].close, 4.0);
        assert_eq!(bars[0].volume, 10.0);
        assert_eq!(bars[0].dxy, None);
    }

    #[test]
    fn missing_required_column_is_reported() {
        let csv = "time,open,high,close\n1,1,1,1\n";
        let err = CsvStorage::read_bars_from(csv.as_bytes()).unwrap_err();
        match err {
            IngestError::MissingColumns { missing } => assert_eq!(missing, vec!["low", "volume"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_number_names_line_and_column() {
        let csv = "time,open,high,low,close,volume\n1,1,2,0.5,1.5,10\n2,1,abc,0.5,1.5,10\n";
        let err = CsvStorage::read_bars_from(csv.as_bytes()).unwrap_err();
        match err {
            IngestError::InvalidNumber {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "high");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_row_is_an_invalid_number() {
        let csv = "time,open,high,low,close,volume\n1,1,2,0.5\n";
        let err = CsvStorage::read_bars_from(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::InvalidNumber {
                column: "close",
                ..
            }
        ));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let csv = "time,open,high,low,close,volume\n1,1,2,0.5,1.5,10\n\n,,,,,\n2,1,2,0.5,1.5,10\n";
        let bars = CsvStorage::read_bars_from(csv.as_bytes()).unwrap();
        assert_eq!(bars.len(), 2);
    }

    #[test]
    fn non_numeric_time_is_kept_as_text() {
        assert_eq!(parse_time_cell("not-a-date"), BarTime::Text("not-a-date".to_string()));
        assert_eq!(parse_time_cell("NaN"), BarTime::Text("NaN".to_string()));
        assert_eq!(parse_time_cell("1.5"), BarTime::Epoch(1.5));
    }
}

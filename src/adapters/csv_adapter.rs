//! CSV candle replay adapter.
//!
//! Reads `{data_dir}/{instrument}.csv` holding rows in provider layout and
//! order: `time,low,high,open,close,volume`, newest first.

use crate::domain::candle_series::{CandleContainer, RawCandleRow};
use crate::domain::error::PivotError;
use crate::ports::candle_port::CandlePort;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub struct CsvCandleAdapter {
    base_path: PathBuf,
}

impl CsvCandleAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, instrument: &str) -> PathBuf {
        self.base_path.join(format!("{instrument}.csv"))
    }

    /// Instruments with a CSV file in the data directory, sorted.
    pub fn list_instruments(&self) -> Result<Vec<String>, PivotError> {
        let mut instruments = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem() {
                    instruments.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        instruments.sort();
        Ok(instruments)
    }
}

impl CandlePort for CsvCandleAdapter {
    fn fetch_lookback(&self, instrument: &str) -> Result<CandleContainer, PivotError> {
        let path = self.csv_path(instrument);
        let content = fs::read_to_string(&path).map_err(|e| PivotError::Fetch {
            instrument: instrument.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut rows = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| PivotError::CandleParse {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            let fields: Vec<Value> = record
                .iter()
                .map(|field| Value::String(field.to_string()))
                .collect();
            let row = RawCandleRow::try_from(fields).map_err(|reason| PivotError::CandleParse {
                reason: format!("{}: {}", path.display(), reason),
            })?;
            rows.push(row);
        }

        debug!(%instrument, rows = rows.len(), path = %path.display(), "loaded candle csv");
        Ok(CandleContainer::new(rows))
    }
}

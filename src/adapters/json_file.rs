//! Pre-fetched candle documents on disk.
//!
//! Accepts the container shape `{"lookback": [[...], ...]}` or a bare row
//! array as saved straight from the provider.

use crate::domain::candle_series::{CandleContainer, RawCandleRow};
use crate::domain::error::PivotError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum CandleDocument {
    Container(CandleContainer),
    Rows(Vec<RawCandleRow>),
}

pub fn parse_container(content: &str) -> Result<CandleContainer, PivotError> {
    let document: CandleDocument =
        serde_json::from_str(content).map_err(|e| PivotError::CandleParse {
            reason: format!("expected {{\"lookback\": [...]}} or a row array: {e}"),
        })?;
    Ok(match document {
        CandleDocument::Container(container) => container,
        CandleDocument::Rows(rows) => CandleContainer::new(rows),
    })
}

pub fn load_container<P: AsRef<Path>>(path: P) -> Result<CandleContainer, PivotError> {
    let content = fs::read_to_string(path)?;
    parse_container(&content)
}

//! Candle series builder.
//!
//! Providers deliver rows as positional tuples
//! `[time, low, high, open, close, volume]`, newest first. This module is the
//! only place those tuples are read: everything downstream sees [`Candle`].

use crate::domain::candle::Candle;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

pub const ROW_TIME: usize = 0;
pub const ROW_LOW: usize = 1;
pub const ROW_HIGH: usize = 2;
pub const ROW_OPEN: usize = 3;
pub const ROW_CLOSE: usize = 4;
pub const ROW_VOLUME: usize = 5;
pub const ROW_WIDTH: usize = 6;

/// One raw provider row, already coerced to numbers.
///
/// Price fields that are not numeric (or numeric strings) become `NaN`
/// rather than failing, so degenerate input degrades into `NaN` levels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Value>")]
pub struct RawCandleRow {
    pub time: Option<i64>,
    pub low: f64,
    pub high: f64,
    pub open: f64,
    pub close: f64,
    pub volume: f64,
}

impl RawCandleRow {
    pub fn new(time: i64, low: f64, high: f64, open: f64, close: f64, volume: f64) -> Self {
        Self {
            time: Some(time),
            low,
            high,
            open,
            close,
            volume,
        }
    }
}

impl TryFrom<Vec<Value>> for RawCandleRow {
    type Error = String;

    fn try_from(row: Vec<Value>) -> Result<Self, Self::Error> {
        if row.len() < ROW_WIDTH {
            return Err(format!(
                "candle row has {} fields, expected {}",
                row.len(),
                ROW_WIDTH
            ));
        }
        Ok(Self {
            time: coerce_time(&row[ROW_TIME]),
            low: coerce_f64(&row[ROW_LOW]),
            high: coerce_f64(&row[ROW_HIGH]),
            open: coerce_f64(&row[ROW_OPEN]),
            close: coerce_f64(&row[ROW_CLOSE]),
            volume: coerce_f64(&row[ROW_VOLUME]),
        })
    }
}

/// A pre-fetched provider payload: `{"lookback": [[...], ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CandleContainer {
    pub lookback: Vec<RawCandleRow>,
}

impl CandleContainer {
    pub fn new(lookback: Vec<RawCandleRow>) -> Self {
        Self { lookback }
    }
}

/// Number, or a string that parses as one. Anything else is `NaN`.
pub fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn coerce_time(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl From<&RawCandleRow> for Candle {
    fn from(row: &RawCandleRow) -> Self {
        Candle {
            timestamp: row.time,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: Some(row.volume),
        }
    }
}

/// Reverse a newest-first feed into an oldest-first candle sequence.
///
/// Reversal is positional. Timestamps are never used to sort, so a feed
/// that is not actually newest-first comes out misaligned.
pub fn build_candle_series(rows: &[RawCandleRow]) -> Vec<Candle> {
    let out_of_order = rows
        .windows(2)
        .filter(|w| matches!((w[0].time, w[1].time), (Some(a), Some(b)) if a <= b))
        .count();
    if out_of_order > 0 {
        debug!(
            rows = rows.len(),
            out_of_order, "raw candle feed is not strictly newest-first"
        );
    }

    rows.iter().rev().map(Candle::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_oldest_first() {
        let rows = vec![
            RawCandleRow::new(300, 10.0, 13.0, 11.0, 12.0, 5.0),
            RawCandleRow::new(200, 9.0, 12.0, 10.0, 11.0, 4.0),
            RawCandleRow::new(100, 8.0, 11.0, 9.0, 10.0, 3.0),
        ];
        let candles = build_candle_series(&rows);

        assert_eq!(candles.len(), 3);
        assert_eq!(candles[0].timestamp, Some(100));
        assert_eq!(candles[2].timestamp, Some(300));
        assert_eq!(candles[0].low, 8.0);
        assert_eq!(candles[0].high, 11.0);
        assert_eq!(candles[0].open, 9.0);
        assert_eq!(candles[0].close, 10.0);
        assert_eq!(candles[0].volume, Some(3.0));
    }

    #[test]
    fn reversal_ignores_timestamp_values() {
        let rows = vec![
            RawCandleRow::new(100, 1.0, 2.0, 1.5, 1.5, 0.0),
            RawCandleRow::new(300, 3.0, 4.0, 3.5, 3.5, 0.0),
        ];
        let candles = build_candle_series(&rows);
        assert_eq!(candles[0].timestamp, Some(300));
        assert_eq!(candles[1].timestamp, Some(100));
    }

    #[test]
    fn empty_feed_builds_empty_series() {
        assert!(build_candle_series(&[]).is_empty());
    }

    #[test]
    fn deserializes_positional_row() {
        let row: RawCandleRow =
            serde_json::from_value(json!([1704067200, 9.0, 12.0, 10.0, 11.0, 1500.5])).unwrap();
        assert_eq!(row, RawCandleRow::new(1704067200, 9.0, 12.0, 10.0, 11.0, 1500.5));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let row: RawCandleRow =
            serde_json::from_value(json!(["1704067200", "9", "12.5", "10", "11", "0"])).unwrap();
        assert_eq!(row.time, Some(1704067200));
        assert_eq!(row.high, 12.5);
    }

    #[test]
    fn non_numeric_prices_become_nan() {
        let row: RawCandleRow =
            serde_json::from_value(json!([1, "abc", null, 10.0, 11.0, 0])).unwrap();
        assert!(row.low.is_nan());
        assert!(row.high.is_nan());
        assert_eq!(row.open, 10.0);
    }

    #[test]
    fn short_row_is_rejected() {
        let result: Result<RawCandleRow, _> = serde_json::from_value(json!([1, 2.0, 3.0]));
        assert!(result.is_err());
    }

    #[test]
    fn container_deserializes_lookback() {
        let container: CandleContainer = serde_json::from_str(
            r#"{"lookback": [[2, 10, 13, 11, 12, 1], [1, 9, 12, 10, 11, 1]]}"#,
        )
        .unwrap();
        assert_eq!(container.lookback.len(), 2);
        assert_eq!(container.lookback[0].time, Some(2));
    }
}

//! Daily candle representation.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

/// One trading period's summary, oldest-first within a sequence.
///
/// `timestamp` and `volume` are provenance only; no level formula reads them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp: None,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// high - low
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// UTC calendar date of the provenance timestamp, if one was carried.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_high_minus_low() {
        let candle = Candle::new(10.0, 12.0, 9.0, 11.0);
        assert!((candle.range() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn date_from_unix_seconds() {
        let mut candle = Candle::new(10.0, 12.0, 9.0, 11.0);
        candle.timestamp = Some(1_704_067_200);
        assert_eq!(candle.date(), NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn date_absent_without_timestamp() {
        let candle = Candle::new(10.0, 12.0, 9.0, 11.0);
        assert_eq!(candle.date(), None);
    }

    #[test]
    fn serializes_without_missing_provenance() {
        let candle = Candle::new(10.0, 12.0, 9.0, 11.0);
        let json = serde_json::to_value(&candle).unwrap();
        assert!(json.get("timestamp").is_none());
        assert!(json.get("volume").is_none());
        assert_eq!(json["close"], 11.0);
    }
}

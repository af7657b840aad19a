#![allow(dead_code)]

use pivotlevels::domain::candle_series::{CandleContainer, RawCandleRow};
use pivotlevels::domain::error::PivotError;
use pivotlevels::ports::candle_port::CandlePort;
use std::cell::RefCell;
use std::collections::HashMap;

pub use pivotlevels::domain::candle::Candle;

pub const DAY: i64 = 86_400;
pub const JAN_1_2024: i64 = 1_704_067_200;

pub struct MockCandlePort {
    pub rows: HashMap<String, Vec<RawCandleRow>>,
    pub messages: HashMap<String, String>,
    pub requests: RefCell<Vec<String>>,
}

impl MockCandlePort {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            messages: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_rows(mut self, instrument: &str, rows: Vec<RawCandleRow>) -> Self {
        self.rows.insert(instrument.to_string(), rows);
        self
    }

    pub fn with_message(mut self, instrument: &str, message: &str) -> Self {
        self.messages
            .insert(instrument.to_string(), message.to_string());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl CandlePort for MockCandlePort {
    fn fetch_lookback(&self, instrument: &str) -> Result<CandleContainer, PivotError> {
        self.requests.borrow_mut().push(instrument.to_string());
        if let Some(message) = self.messages.get(instrument) {
            return Err(PivotError::Provider {
                instrument: instrument.to_string(),
                message: message.clone(),
            });
        }
        Ok(CandleContainer::new(
            self.rows.get(instrument).cloned().unwrap_or_default(),
        ))
    }
}

pub fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle::new(open, high, low, close)
}

/// `count` oldest-first candles drifting upward from `start_price`.
pub fn generate_candles(count: usize, start_price: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let base = start_price + i as f64;
            let mut c = Candle::new(base, base + 2.0, base - 1.5, base + 0.5 * (i % 3) as f64);
            c.timestamp = Some(JAN_1_2024 + i as i64 * DAY);
            c
        })
        .collect()
}

/// Provider rows for `candles`, newest first.
pub fn to_provider_rows(candles: &[Candle]) -> Vec<RawCandleRow> {
    candles
        .iter()
        .rev()
        .map(|c| RawCandleRow {
            time: c.timestamp,
            low: c.low,
            high: c.high,
            open: c.open,
            close: c.close,
            volume: c.volume.unwrap_or(0.0),
        })
        .collect()
}

/// JSON provider body for `candles`, newest first.
pub fn provider_json(candles: &[Candle]) -> String {
    let rows: Vec<String> = to_provider_rows(candles)
        .iter()
        .map(|r| {
            format!(
                "[{}, {}, {}, {}, {}, {}]",
                r.time.unwrap_or(0),
                r.low,
                r.high,
                r.open,
                r.close,
                r.volume
            )
        })
        .collect();
    format!("[{}]", rows.join(", "))
}

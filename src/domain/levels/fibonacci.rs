//! Fibonacci retracements.
//!
//! Six levels per day at fixed ratios of the day's range. A downtrend
//! measures down from the high, an uptrend measures up from the low.

use crate::domain::candle::Candle;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const RETRACEMENTS: [f64; 6] = [1.0, 0.618, 0.5, 0.382, 0.236, 0.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trend {
    #[default]
    Down,
    Up,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Down => write!(f, "down"),
            Trend::Up => write!(f, "up"),
        }
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "down" | "downtrend" => Ok(Trend::Down),
            "up" | "uptrend" => Ok(Trend::Up),
            other => Err(format!("unknown trend: {other}")),
        }
    }
}

impl From<bool> for Trend {
    fn from(uptrend: bool) -> Self {
        if uptrend { Trend::Up } else { Trend::Down }
    }
}

/// Levels in [`RETRACEMENTS`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FibonacciLevels(pub [f64; 6]);

impl FibonacciLevels {
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        RETRACEMENTS.iter().copied().zip(self.0.iter().copied())
    }
}

pub fn calculate_fibonacci(candles: &[Candle], trend: Trend) -> Vec<FibonacciLevels> {
    candles
        .iter()
        .map(|c| {
            let diff = c.range();
            let mut levels = [0.0; 6];
            for (level, ratio) in levels.iter_mut().zip(RETRACEMENTS) {
                *level = match trend {
                    Trend::Down => c.high - diff * ratio,
                    Trend::Up => c.low + diff * ratio,
                };
            }
            FibonacciLevels(levels)
        })
        .collect()
}

//! Tom DeMark predicted high/low.
//!
//! X depends on the day's direction:
//!   C < O: X = H + 2L + C
//!   C > O: X = 2H + L + C
//!   C = O: X = H + L + 2C
//! High = X/2 - L, Low = X/2 - H

use crate::domain::candle::Candle;
use crate::domain::levels::DemarkPoints;

pub fn calculate_demark(candles: &[Candle]) -> Vec<DemarkPoints> {
    candles
        .iter()
        .map(|c| {
            let x = demark_x(c);
            DemarkPoints {
                low: x / 2.0 - c.high,
                high: x / 2.0 - c.low,
            }
        })
        .collect()
}

// NaN open/close matches no branch and leaves x at zero.
fn demark_x(c: &Candle) -> f64 {
    if c.close < c.open {
        c.high + 2.0 * c.low + c.close
    } else if c.close > c.open {
        2.0 * c.high + c.low + c.close
    } else if c.close == c.open {
        c.high + c.low + 2.0 * c.close
    } else {
        0.0
    }
}

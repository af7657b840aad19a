//! Floor pivots.
//!
//! PL = (H + L + C) / 3
//! R1 = 2*PL - L, R2 = PL + (H - L), R3 = R1 + (H - L)
//! S1 = 2*PL - H, S2 = PL - (H - L), S3 = S1 - (H - L)

use crate::domain::candle::Candle;
use crate::domain::levels::FloorPivots;

pub fn calculate_floor_pivots(candles: &[Candle]) -> Vec<FloorPivots> {
    candles
        .iter()
        .map(|c| {
            let pl = (c.high + c.low + c.close) / 3.0;
            let r1 = 2.0 * pl - c.low;
            let s1 = 2.0 * pl - c.high;
            FloorPivots {
                r3: r1 + c.high - c.low,
                r2: pl + c.high - c.low,
                r1,
                pl,
                s1,
                s2: pl - c.high + c.low,
                s3: s1 - c.high + c.low,
            }
        })
        .collect()
}

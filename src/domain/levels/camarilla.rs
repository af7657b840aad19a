//! Camarilla bands.
//!
//! With D = (H - L) * 1.1:
//!   R4 = C + D/2,  R3 = C + D/4,  R2 = C + D/6,  R1 = C + D/12
//!   S1 = C - D/12, S2 = C - D/6,  S3 = C - D/4,  S4 = C - D/2

use crate::domain::candle::Candle;
use crate::domain::levels::CamarillaLevels;

pub const CAMARILLA_FACTOR: f64 = 1.1;

pub fn calculate_camarilla(candles: &[Candle]) -> Vec<CamarillaLevels> {
    candles
        .iter()
        .map(|c| {
            let d = c.range() * CAMARILLA_FACTOR;
            CamarillaLevels {
                r4: d / 2.0 + c.close,
                r3: d / 4.0 + c.close,
                r2: d / 6.0 + c.close,
                r1: d / 12.0 + c.close,
                s1: c.close - d / 12.0,
                s2: c.close - d / 6.0,
                s3: c.close - d / 4.0,
                s4: c.close - d / 2.0,
            }
        })
        .collect()
}

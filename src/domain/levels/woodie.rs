//! Woodie pivots.
//!
//! P = (H + L + 2C) / 4
//! R1 = 2P - L, R2 = P + H - L, S1 = 2P - H, S2 = P - H + L

use crate::domain::candle::Candle;
use crate::domain::levels::WoodiePoints;

pub fn calculate_woodie(candles: &[Candle]) -> Vec<WoodiePoints> {
    candles
        .iter()
        .map(|c| {
            let pivot = (c.high + c.low + 2.0 * c.close) / 4.0;
            WoodiePoints {
                pivot,
                r1: 2.0 * pivot - c.low,
                r2: pivot + c.high - c.low,
                s1: 2.0 * pivot - c.high,
                s2: pivot - c.high + c.low,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn woodie_known_values() {
        // P = (13 + 10 + 24) / 4 = 11.75
        let candles = vec![Candle::new(11.0, 13.0, 10.0, 12.0)];
        let w = calculate_woodie(&candles)[0];
        assert_relative_eq!(w.pivot, 11.75);
        assert_relative_eq!(w.r1, 13.5);
        assert_relative_eq!(w.r2, 14.75);
        assert_relative_eq!(w.s1, 10.5);
        assert_relative_eq!(w.s2, 8.75);
    }

    #[test]
    fn woodie_pivot_between_s1_and_r1() {
        let candles = vec![
            Candle::new(100.0, 110.0, 90.0, 90.0),
            Candle::new(100.0, 110.0, 90.0, 110.0),
            Candle::new(100.0, 100.0, 100.0, 100.0),
        ];
        for w in calculate_woodie(&candles) {
            assert!(w.s1 <= w.pivot && w.pivot <= w.r1);
        }
    }

    #[test]
    fn woodie_empty_candles() {
        assert!(calculate_woodie(&[]).is_empty());
    }
}

//! Plain-text rendering of computed levels for the console.

use crate::domain::candle::Candle;
use crate::domain::enriched::EnrichedDay;
use crate::domain::levels::{FibonacciLevels, LevelKind, Trend};
use std::fmt::Write;

fn header(out: &mut String, label: &str, candle: &Candle) {
    let date = candle
        .date()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(out, "=== {label} ({date}) ===");
    let _ = writeln!(
        out,
        "O {:.4}  H {:.4}  L {:.4}  C {:.4}",
        candle.open, candle.high, candle.low, candle.close
    );
}

fn row(out: &mut String, name: &str, value: f64) {
    let _ = writeln!(out, "  {:<6}{:>14.4}", name, value);
}

pub fn render_levels(label: &str, day: &EnrichedDay) -> String {
    let mut out = String::new();
    header(&mut out, label, &day.candle);

    for kind in LevelKind::ALL {
        let _ = writeln!(out, "\n{kind}");
        match kind {
            LevelKind::Floor => {
                if let Some(f) = day.floor() {
                    for (name, v) in [
                        ("R3", f.r3),
                        ("R2", f.r2),
                        ("R1", f.r1),
                        ("PL", f.pl),
                        ("S1", f.s1),
                        ("S2", f.s2),
                        ("S3", f.s3),
                    ] {
                        row(&mut out, name, v);
                    }
                }
            }
            LevelKind::Demark => {
                if let Some(t) = day.tom() {
                    row(&mut out, "HIGH", t.high);
                    row(&mut out, "LOW", t.low);
                }
            }
            LevelKind::Woodie => {
                if let Some(w) = day.wood() {
                    for (name, v) in [
                        ("R2", w.r2),
                        ("R1", w.r1),
                        ("PIVOT", w.pivot),
                        ("S1", w.s1),
                        ("S2", w.s2),
                    ] {
                        row(&mut out, name, v);
                    }
                }
            }
            LevelKind::Camarilla => {
                if let Some(c) = day.cam() {
                    for (name, v) in [
                        ("R4", c.r4),
                        ("R3", c.r3),
                        ("R2", c.r2),
                        ("R1", c.r1),
                        ("S1", c.s1),
                        ("S2", c.s2),
                        ("S3", c.s3),
                        ("S4", c.s4),
                    ] {
                        row(&mut out, name, v);
                    }
                }
            }
        }
    }
    out
}

pub fn render_fibonacci(
    label: &str,
    candle: &Candle,
    trend: Trend,
    levels: &FibonacciLevels,
) -> String {
    let mut out = String::new();
    header(&mut out, label, candle);
    let _ = writeln!(out, "\nFIBONACCI ({trend}trend)");
    for (ratio, level) in levels.iter() {
        row(&mut out, &format!("{:.1}%", ratio * 100.0), level);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::levels::calculate_fibonacci;
    use crate::domain::pipeline::compute_levels;

    fn sample() -> Vec<Candle> {
        vec![
            Candle::new(10.0, 12.0, 9.0, 11.0),
            Candle::new(11.0, 13.0, 10.0, 12.0),
        ]
    }

    #[test]
    fn levels_report_lists_every_indicator() {
        let day = compute_levels(&sample()).unwrap().unwrap();
        let text = render_levels("BTC-USD", &day);

        assert!(text.starts_with("=== BTC-USD (-) ==="));
        for section in ["FLOOR", "DEMARK", "WOODIE", "CAMARILLA"] {
            assert!(text.contains(section), "missing {section}");
        }
        // (12 + 9 + 11) / 3
        assert!(text.contains("10.6667"));
    }

    #[test]
    fn levels_report_shows_provenance_date() {
        let mut candles = sample();
        candles[0].timestamp = Some(1_704_067_200);
        let day = compute_levels(&candles).unwrap().unwrap();
        assert!(render_levels("X", &day).contains("(2024-01-01)"));
    }

    #[test]
    fn fibonacci_report_lists_ratios() {
        let candles = vec![Candle::new(100.0, 200.0, 100.0, 150.0)];
        let levels = calculate_fibonacci(&candles, Trend::Down)[0];
        let text = render_fibonacci("X", &candles[0], Trend::Down, &levels);

        assert!(text.contains("FIBONACCI (downtrend)"));
        assert!(text.contains("61.8%"));
        assert!(text.contains("138.2000"));
    }
}

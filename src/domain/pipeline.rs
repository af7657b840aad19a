//! Level pipeline: enrich every day, then pick the last closed one.
//!
//! Floor, DeMark, Woodie and Camarilla run over the same candle slice and
//! are merged under `floor`, `tom`, `wood` and `cam`. The most recent day
//! may still be trading, so the selected record is the second-to-last.

use crate::domain::candle::Candle;
use crate::domain::enriched::{merge_aligned, EnrichedDay};
use crate::domain::error::PivotError;
use crate::domain::levels::{
    calculate_camarilla, calculate_demark, calculate_fibonacci, calculate_floor_pivots,
    calculate_woodie, FibonacciLevels, LevelKind, Trend,
};
use tracing::debug;

/// Days needed before a closed day can be selected.
pub const MIN_CANDLES: usize = 2;

/// Attach all four merged level records to every day.
pub fn enrich(candles: &[Candle]) -> Result<Vec<EnrichedDay>, PivotError> {
    let mut days: Vec<EnrichedDay> = candles.iter().cloned().map(EnrichedDay::from).collect();

    for kind in LevelKind::ALL {
        days = match kind {
            LevelKind::Floor => {
                merge_aligned(&days, &calculate_floor_pivots(candles), kind.field())?
            }
            LevelKind::Demark => merge_aligned(&days, &calculate_demark(candles), kind.field())?,
            LevelKind::Woodie => merge_aligned(&days, &calculate_woodie(candles), kind.field())?,
            LevelKind::Camarilla => {
                merge_aligned(&days, &calculate_camarilla(candles), kind.field())?
            }
        };
        debug!(indicator = %kind, days = days.len(), "merged levels");
    }

    Ok(days)
}

/// Index of the last fully closed day, if there is one.
pub fn selected_index(len: usize) -> Option<usize> {
    len.checked_sub(MIN_CANDLES)
}

/// Levels for the second-to-last day, or `None` with fewer than two days.
pub fn compute_levels(candles: &[Candle]) -> Result<Option<EnrichedDay>, PivotError> {
    let Some(index) = selected_index(candles.len()) else {
        debug!(
            candles = candles.len(),
            minimum = MIN_CANDLES,
            "not enough candles to select a closed day"
        );
        return Ok(None);
    };

    let mut days = enrich(candles)?;
    Ok(Some(days.swap_remove(index)))
}

/// Fibonacci levels for the same day [`compute_levels`] would select.
pub fn fibonacci_for_selected_day(candles: &[Candle], trend: Trend) -> Option<FibonacciLevels> {
    let index = selected_index(candles.len())?;
    calculate_fibonacci(&candles[index..=index], trend)
        .into_iter()
        .next()
}

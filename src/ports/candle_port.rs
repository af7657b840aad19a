//! Candle provider port.

use crate::domain::candle_series::CandleContainer;
use crate::domain::error::PivotError;

pub trait CandlePort {
    /// Raw lookback rows for `instrument`, newest first.
    fn fetch_lookback(&self, instrument: &str) -> Result<CandleContainer, PivotError>;
}

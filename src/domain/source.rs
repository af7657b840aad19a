//! Public entry point: resolve a candle source and compute its levels.

use crate::domain::candle::Candle;
use crate::domain::candle_series::{build_candle_series, CandleContainer};
use crate::domain::enriched::EnrichedDay;
use crate::domain::error::PivotError;
use crate::domain::pipeline::compute_levels;
use crate::ports::candle_port::CandlePort;
use tracing::info;

/// Where the candles come from.
#[derive(Debug, Clone, PartialEq)]
pub enum CandleSource {
    /// Fetch from the candle provider.
    Instrument(String),
    /// Already fetched.
    Container(CandleContainer),
}

impl From<&str> for CandleSource {
    fn from(instrument: &str) -> Self {
        CandleSource::Instrument(instrument.to_string())
    }
}

impl From<CandleContainer> for CandleSource {
    fn from(container: CandleContainer) -> Self {
        CandleSource::Container(container)
    }
}

/// Resolve `source` into an oldest-first candle sequence.
///
/// A provider failure is returned as-is and nothing downstream runs.
pub fn load_candles(
    source: CandleSource,
    port: &dyn CandlePort,
) -> Result<Vec<Candle>, PivotError> {
    let container = match source {
        CandleSource::Instrument(instrument) => {
            let container = port.fetch_lookback(&instrument)?;
            info!(%instrument, rows = container.lookback.len(), "fetched candles");
            container
        }
        CandleSource::Container(container) => container,
    };
    Ok(build_candle_series(&container.lookback))
}

/// Support/resistance levels for the last closed day of `source`.
///
/// `Ok(None)` when fewer than two days of data are available.
pub fn support_resistance(
    source: CandleSource,
    port: &dyn CandlePort,
) -> Result<Option<EnrichedDay>, PivotError> {
    let candles = load_candles(source, port)?;
    compute_levels(&candles)
}

//! pivotlevels — support/resistance levels from daily candles.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;

pub use domain::error::PivotError;
pub use domain::source::{support_resistance, CandleSource};

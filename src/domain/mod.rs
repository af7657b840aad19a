//! Core domain types and logic.

pub mod candle;
pub mod candle_series;
pub mod config_validation;
pub mod enriched;
pub mod error;
pub mod levels;
pub mod pipeline;
pub mod source;

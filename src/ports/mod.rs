//! Port traits implemented by adapters.

pub mod candle_port;
pub mod config_port;

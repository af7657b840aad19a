//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod http_candle_adapter;
pub mod json_file;
pub mod text_report;

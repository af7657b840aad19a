//! Configuration validation.
//!
//! Checks the provider and output sections before any request is made.

use crate::domain::error::PivotError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_BASE_URL: &str = "https://api.gdax.com";
pub const DEFAULT_GRANULARITY: i64 = 86_400;
pub const DEFAULT_LOOKBACK_HOURS: i64 = 24;
pub const DEFAULT_USER_AGENT: &str = "pivotlevels";

/// Candle widths the provider accepts, in seconds.
pub const ALLOWED_GRANULARITIES: [i64; 6] = [60, 300, 900, 3_600, 21_600, 86_400];

pub const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

pub fn validate_provider_config(config: &dyn ConfigPort) -> Result<(), PivotError> {
    validate_base_url(config)?;
    validate_granularity(config)?;
    validate_lookback(config)?;
    Ok(())
}

pub fn validate_output_config(config: &dyn ConfigPort) -> Result<(), PivotError> {
    let format = config.get_string_or("output", "format", "text");
    if !OUTPUT_FORMATS.contains(&format.to_lowercase().as_str()) {
        return Err(PivotError::ConfigInvalid {
            section: "output".to_string(),
            key: "format".to_string(),
            reason: format!("format must be one of {}", OUTPUT_FORMATS.join(", ")),
        });
    }
    Ok(())
}

fn validate_base_url(config: &dyn ConfigPort) -> Result<(), PivotError> {
    let url = config.get_string_or("provider", "base_url", DEFAULT_BASE_URL);
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(PivotError::ConfigInvalid {
            section: "provider".to_string(),
            key: "base_url".to_string(),
            reason: "base_url must start with http:// or https://".to_string(),
        });
    }
    Ok(())
}

fn validate_granularity(config: &dyn ConfigPort) -> Result<(), PivotError> {
    let value = config.get_int("provider", "granularity", DEFAULT_GRANULARITY);
    if !ALLOWED_GRANULARITIES.contains(&value) {
        return Err(PivotError::ConfigInvalid {
            section: "provider".to_string(),
            key: "granularity".to_string(),
            reason: format!("granularity {value} is not one of {ALLOWED_GRANULARITIES:?}"),
        });
    }
    Ok(())
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), PivotError> {
    let value = config.get_int("provider", "lookback_hours", DEFAULT_LOOKBACK_HOURS);
    if value <= 0 {
        return Err(PivotError::ConfigInvalid {
            section: "provider".to_string(),
            key: "lookback_hours".to_string(),
            reason: "lookback_hours must be positive".to_string(),
        });
    }
    Ok(())
}

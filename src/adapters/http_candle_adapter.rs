//! HTTP candle provider adapter.
//!
//! `GET {base_url}/products/{instrument}/candles?start=..&end=..&granularity=..`
//! answered with `[[time, low, high, open, close, volume], ...]`, newest first.
//! An error payload is a JSON object carrying a `message` field.

use crate::domain::candle_series::{CandleContainer, RawCandleRow};
use crate::domain::config_validation::{
    DEFAULT_BASE_URL, DEFAULT_GRANULARITY, DEFAULT_LOOKBACK_HOURS, DEFAULT_USER_AGENT,
};
use crate::domain::error::PivotError;
use crate::ports::candle_port::CandlePort;
use crate::ports::config_port::ConfigPort;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub granularity: i64,
    pub lookback_hours: i64,
    pub user_agent: String,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_proxy: bool,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            granularity: DEFAULT_GRANULARITY,
            lookback_hours: DEFAULT_LOOKBACK_HOURS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            use_proxy: true,
        }
    }
}

impl ProviderSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        Self {
            base_url: config.get_string_or("provider", "base_url", DEFAULT_BASE_URL),
            granularity: config.get_int("provider", "granularity", DEFAULT_GRANULARITY),
            lookback_hours: config.get_int("provider", "lookback_hours", DEFAULT_LOOKBACK_HOURS),
            user_agent: config.get_string_or("provider", "user_agent", DEFAULT_USER_AGENT),
            use_proxy: config.get_bool("provider", "use_proxy", true),
        }
    }
}

pub struct HttpCandleAdapter {
    settings: ProviderSettings,
    client: Client,
}

impl HttpCandleAdapter {
    /// Single request per fetch: no retry, no timeout.
    pub fn new(settings: ProviderSettings) -> Result<Self, PivotError> {
        let mut builder = Client::builder().timeout(None::<Duration>);
        if !settings.use_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(std::io::Error::other)?;
        Ok(Self { settings, client })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, PivotError> {
        Self::new(ProviderSettings::from_config(config))
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Request URL covering `[now - lookback, now]`.
    pub fn candles_url(&self, instrument: &str, now: DateTime<Utc>) -> Result<Url, PivotError> {
        let start = now - TimeDelta::hours(self.settings.lookback_hours);
        let base = format!(
            "{}/products/{}/candles",
            self.settings.base_url.trim_end_matches('/'),
            instrument
        );
        Url::parse_with_params(
            &base,
            &[
                ("start", start.to_rfc3339_opts(SecondsFormat::Millis, true)),
                ("end", now.to_rfc3339_opts(SecondsFormat::Millis, true)),
                ("granularity", self.settings.granularity.to_string()),
            ],
        )
        .map_err(|e| PivotError::ConfigInvalid {
            section: "provider".into(),
            key: "base_url".into(),
            reason: e.to_string(),
        })
    }
}

impl CandlePort for HttpCandleAdapter {
    fn fetch_lookback(&self, instrument: &str) -> Result<CandleContainer, PivotError> {
        let url = self.candles_url(instrument, Utc::now())?;
        debug!(%url, "requesting candles");

        let fetch_err = |e: reqwest::Error| PivotError::Fetch {
            instrument: instrument.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.settings.user_agent.as_str())
            .send()
            .map_err(fetch_err)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(fetch_err)?;

        parse_candle_response(instrument, status, &body)
    }
}

/// Decode a provider response body.
///
/// The `message` check comes first, so an error payload is reported as a
/// provider error whatever the HTTP status was. A `message` that is null,
/// false, zero or empty does not count.
pub fn parse_candle_response(
    instrument: &str,
    status: u16,
    body: &str,
) -> Result<CandleContainer, PivotError> {
    let value: Value = serde_json::from_str(body).map_err(|e| PivotError::CandleParse {
        reason: format!("invalid JSON from provider: {e}"),
    })?;

    if let Some(message) = value.get("message").and_then(error_message) {
        warn!(%instrument, status, %message, "provider returned an error");
        return Err(PivotError::Provider {
            instrument: instrument.to_string(),
            message,
        });
    }

    if !(200..300).contains(&status) {
        return Err(PivotError::Fetch {
            instrument: instrument.to_string(),
            reason: format!("HTTP status {status}"),
        });
    }

    let lookback: Vec<RawCandleRow> =
        serde_json::from_value(value).map_err(|e| PivotError::CandleParse {
            reason: format!("unexpected candle payload: {e}"),
        })?;
    Ok(CandleContainer::new(lookback))
}

fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

//! Domain error types.

/// Top-level error type for pivotlevels.
#[derive(Debug, thiserror::Error)]
pub enum PivotError {
    #[error("alignment error: {reason}")]
    Alignment { reason: String },

    #[error("provider error for {instrument}: {message}")]
    Provider { instrument: String, message: String },

    #[error("fetch failed for {instrument}: {reason}")]
    Fetch { instrument: String, reason: String },

    #[error("candle parse error: {reason}")]
    CandleParse { reason: String },

    #[error("insufficient data for {instrument}: have {candles} candles, need {minimum}")]
    InsufficientData {
        instrument: String,
        candles: usize,
        minimum: usize,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PivotError> for std::process::ExitCode {
    fn from(err: &PivotError) -> Self {
        let code: u8 = match err {
            PivotError::Io(_) => 1,
            PivotError::ConfigParse { .. }
            | PivotError::ConfigMissing { .. }
            | PivotError::ConfigInvalid { .. } => 2,
            PivotError::Provider { .. } | PivotError::Fetch { .. } => 3,
            PivotError::CandleParse { .. } => 4,
            PivotError::InsufficientData { .. } => 5,
            PivotError::Alignment { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}

//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

use crate::adapters::csv_adapter::CsvCandleAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::http_candle_adapter::HttpCandleAdapter;
use crate::adapters::json_file;
use crate::adapters::text_report::{render_fibonacci, render_levels};
use crate::domain::config_validation::{validate_output_config, validate_provider_config};
use crate::domain::enriched::EnrichedDay;
use crate::domain::error::PivotError;
use crate::domain::levels::Trend;
use crate::domain::pipeline::{
    compute_levels, fibonacci_for_selected_day, selected_index, MIN_CANDLES,
};
use crate::domain::source::{load_candles, CandleSource};
use crate::ports::candle_port::CandlePort;
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "pivotlevels", about = "Support/resistance levels from daily candles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Floor, DeMark, Woodie and Camarilla levels for the last closed day
    Levels {
        /// Instrument to fetch, e.g. BTC-USD
        instrument: Option<String>,
        /// Pre-fetched candle document instead of fetching
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Fibonacci retracements for the last closed day
    Fibonacci {
        instrument: Option<String>,
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Measure up from the low instead of down from the high
        #[arg(long)]
        uptrend: bool,
    },
    /// Validate a configuration file
    ValidateConfig {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List instruments available in the CSV data directory
    ListInstruments {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Levels {
            instrument,
            input,
            config,
            format,
        } => run_levels(instrument.as_deref(), input.as_ref(), config.as_ref(), format),
        Command::Fibonacci {
            instrument,
            input,
            config,
            format,
            uptrend,
        } => run_fibonacci(
            instrument.as_deref(),
            input.as_ref(),
            config.as_ref(),
            format,
            Trend::from(uptrend),
        ),
        Command::ValidateConfig { config } => run_validate_config(&config),
        Command::ListInstruments { config } => run_list_instruments(&config),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, PivotError> {
    let Some(path) = path else {
        return Ok(FileConfigAdapter::empty());
    };
    debug!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

/// `--input` wins over the instrument argument; one of them is required.
pub fn resolve_source(
    instrument: Option<&str>,
    input: Option<&PathBuf>,
) -> Result<CandleSource, PivotError> {
    match (input, instrument) {
        (Some(path), _) => {
            let container = json_file::load_container(path)?;
            info!(
                path = %path.display(),
                rows = container.lookback.len(),
                "loaded candle document"
            );
            Ok(CandleSource::Container(container))
        }
        (None, Some(instrument)) => Ok(CandleSource::Instrument(instrument.to_string())),
        (None, None) => Err(PivotError::ConfigMissing {
            section: "cli".into(),
            key: "instrument or --input".into(),
        }),
    }
}

/// CSV replay when `[csv] data_dir` is set, otherwise the HTTP provider.
pub fn build_candle_port(config: &dyn ConfigPort) -> Result<Box<dyn CandlePort>, PivotError> {
    match config
        .get_string("csv", "data_dir")
        .filter(|s| !s.trim().is_empty())
    {
        Some(dir) => {
            debug!(%dir, "using csv candle source");
            Ok(Box::new(CsvCandleAdapter::new(PathBuf::from(dir.trim()))))
        }
        None => Ok(Box::new(HttpCandleAdapter::from_config(config)?)),
    }
}

/// The flag overrides `[output] format`.
pub fn resolve_format(flag: Option<OutputFormat>, config: &dyn ConfigPort) -> OutputFormat {
    flag.unwrap_or_else(|| {
        match config.get_string_or("output", "format", "text").to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    })
}

fn prepare(
    config_path: Option<&PathBuf>,
) -> Result<(FileConfigAdapter, Box<dyn CandlePort>), PivotError> {
    let config = load_config(config_path)?;
    validate_provider_config(&config)?;
    validate_output_config(&config)?;
    let port = build_candle_port(&config)?;
    Ok((config, port))
}

fn source_label(source: &CandleSource) -> String {
    match source {
        CandleSource::Instrument(instrument) => instrument.clone(),
        CandleSource::Container(_) => "input".to_string(),
    }
}

pub fn run_levels(
    instrument: Option<&str>,
    input: Option<&PathBuf>,
    config_path: Option<&PathBuf>,
    format: Option<OutputFormat>,
) -> Result<String, PivotError> {
    let (config, port) = prepare(config_path)?;
    let source = resolve_source(instrument, input)?;
    let label = source_label(&source);

    let candles = load_candles(source, port.as_ref())?;
    let day = compute_levels(&candles)?.ok_or_else(|| PivotError::InsufficientData {
        instrument: label.clone(),
        candles: candles.len(),
        minimum: MIN_CANDLES,
    })?;

    render_day(&label, &day, resolve_format(format, &config))
}

pub fn render_day(
    label: &str,
    day: &EnrichedDay,
    format: OutputFormat,
) -> Result<String, PivotError> {
    match format {
        OutputFormat::Text => Ok(render_levels(label, day)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(day).map_err(|e| PivotError::Io(e.into()))
        }
    }
}

pub fn run_fibonacci(
    instrument: Option<&str>,
    input: Option<&PathBuf>,
    config_path: Option<&PathBuf>,
    format: Option<OutputFormat>,
    trend: Trend,
) -> Result<String, PivotError> {
    let (config, port) = prepare(config_path)?;
    let source = resolve_source(instrument, input)?;
    let label = source_label(&source);

    let candles = load_candles(source, port.as_ref())?;
    let insufficient = || PivotError::InsufficientData {
        instrument: label.clone(),
        candles: candles.len(),
        minimum: MIN_CANDLES,
    };
    let index = selected_index(candles.len()).ok_or_else(insufficient)?;
    let levels = fibonacci_for_selected_day(&candles, trend).ok_or_else(insufficient)?;
    let candle = &candles[index];

    match resolve_format(format, &config) {
        OutputFormat::Text => Ok(render_fibonacci(&label, candle, trend, &levels)),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "candle": candle,
                "trend": trend.to_string(),
                "levels": levels,
            });
            serde_json::to_string_pretty(&value).map_err(|e| PivotError::Io(e.into()))
        }
    }
}

pub fn run_validate_config(config_path: &PathBuf) -> Result<String, PivotError> {
    eprintln!("Validating config: {}", config_path.display());
    let config = load_config(Some(config_path))?;
    validate_provider_config(&config)?;
    validate_output_config(&config)?;

    let source = match config.get_string("csv", "data_dir") {
        Some(dir) if !dir.trim().is_empty() => format!("csv ({})", dir.trim()),
        _ => format!(
            "http ({})",
            HttpCandleAdapter::from_config(&config)?.settings().base_url
        ),
    };
    let origin = config
        .origin()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    Ok(format!(
        "Configuration {origin} is valid. Candle source: {source}"
    ))
}

pub fn run_list_instruments(config_path: &PathBuf) -> Result<String, PivotError> {
    let config = load_config(Some(config_path))?;
    let dir = config
        .get_string("csv", "data_dir")
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| PivotError::ConfigMissing {
            section: "csv".into(),
            key: "data_dir".into(),
        })?;

    let instruments = CsvCandleAdapter::new(PathBuf::from(dir.trim())).list_instruments()?;
    eprintln!("{} instruments found", instruments.len());
    Ok(instruments.join("\n"))
}

//! INI configuration adapter.
//!
//! Lookups are case-insensitive. Values are trimmed and a blank value counts
//! as unset, so `user_agent =` falls back to the caller's default.

use crate::domain::error::PivotError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct FileConfigAdapter {
    ini: Ini,
    origin: Option<PathBuf>,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PivotError> {
        let path = path.as_ref();
        let mut ini = Ini::new();
        ini.load(path).map_err(|reason| PivotError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        debug!(path = %path.display(), sections = ini.sections().len(), "loaded config");
        Ok(Self {
            ini,
            origin: Some(path.to_path_buf()),
        })
    }

    pub fn from_string(content: &str) -> Result<Self, PivotError> {
        let mut ini = Ini::new();
        ini.read(content.to_string())
            .map_err(|reason| PivotError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { ini, origin: None })
    }

    /// No file given: every lookup falls back to its default.
    pub fn empty() -> Self {
        Self {
            ini: Ini::new(),
            origin: None,
        }
    }

    /// Path the configuration was read from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    fn value(&self, section: &str, key: &str) -> Option<String> {
        self.ini
            .get(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.value(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.value(section, key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.value(section, key)
            .as_deref()
            .and_then(parse_flag)
            .unwrap_or(default)
    }
}

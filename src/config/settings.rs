use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SnoopError};

/// Environment variable naming a TOML config file for [`SnoopConfig::load`].
pub const CONFIG_ENV: &str = "SNOOP_CONFIG";

/// Recorder settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnoopConfig {
    /// Extra action-type prefixes to keep out of history. The framework's
    /// `@@redux/REPLACE` prefix is always ignored on top of these.
    pub ignore_prefixes: Vec<String>,
    /// Emit every record at `info` instead of `debug`.
    pub log_records: bool,
}

/// TOML representation (all fields optional)
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    filter: Option<FilterConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FilterConfig {
    ignore_prefixes: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LoggingConfig {
    log_records: Option<bool>,
}

impl SnoopConfig {
    /// Parse TOML, layering the fields it sets over the defaults.
    ///
    /// ```toml
    /// [filter]
    /// ignore_prefixes = ["@@router/"]
    ///
    /// [logging]
    /// log_records = true
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = SnoopConfig::default();

        if let Some(filter) = toml_config.filter {
            if let Some(prefixes) = filter.ignore_prefixes {
                config.ignore_prefixes = prefixes;
            }
        }

        if let Some(logging) = toml_config.logging {
            if let Some(log_records) = logging.log_records {
                config.log_records = log_records;
            }
        }

        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| SnoopError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load the file named by `SNOOP_CONFIG`, or defaults when it is unset.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load_from_path(&PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }
}

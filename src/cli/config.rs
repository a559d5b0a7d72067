//! Configuration file
//!
//! ```json
//! { "schema_dir": "./schemas", "log_level": "info" }
//! ```
//!
//! Every key is optional. Without `--config`, `./fieldguard.json` is read
//! when it exists and built-in defaults are used otherwise.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::Severity;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "./fieldguard.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory of schema documents
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Minimum log severity: trace, info, warn, error or fatal
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("./schemas")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, else the default file when present, else
    /// built-in defaults.
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate configuration values
    fn validate(&self) -> CliResult<()> {
        self.severity()?;
        if self.schema_dir.as_os_str().is_empty() {
            return Err(CliError::config_error("schema_dir must not be empty"));
        }
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(|e| CliError::config_error(format!("Invalid log_level: {}", e)))
    }
}

mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use crate::parser::ParseOptions;
use defaults::*;
use globset::Glob;
use std::path::Path;
use tracing::debug;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            max_report_bytes: default_max_report_bytes(),
            format: OutputFormat::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config if the file exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != default_version() {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }

        if self.max_report_bytes == Some(0) {
            return Err(ConfigError::ZeroReportCap);
        }

        if self.batch.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        for pattern in self.batch.include.iter().chain(&self.batch.exclude) {
            Glob::new(pattern).map_err(|e| ConfigError::GlobPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
        }

        Ok(())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_report_bytes: self.max_report_bytes,
        }
    }
}

//! TOML run configuration: where to read the trade log from, and analysis knobs.
//!
//! ```toml
//! [source]
//! sheet_id = "1AbC..."
//! gid = "0"
//! local_paths = ["docs/PremiumExtract Strategy.csv"]
//!
//! [analysis]
//! rolling_window = 10
//! ```
//!
//! Every key is optional; a missing file section falls back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::rolling::DEFAULT_ROLLING_WINDOW;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Where trade rows come from. Sources are tried sheet first, then local paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub sheet_id: Option<String>,
    pub gid: String,
    pub timeout_secs: u64,
    pub local_paths: Vec<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            sheet_id: None,
            gid: "0".to_string(),
            timeout_secs: 30,
            local_paths: Vec::new(),
        }
    }
}

impl SourceConfig {
    /// Sheet id, ignoring a blank value.
    pub fn sheet_id(&self) -> Option<&str> {
        self.sheet_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn has_sources(&self) -> bool {
        self.sheet_id().is_some() || !self.local_paths.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub rolling_window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rolling_window: DEFAULT_ROLLING_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub source: SourceConfig,
    pub analysis: AnalysisConfig,
}

impl RunConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.rolling_window == 0 {
            return Err(ConfigError::Invalid(
                "analysis.rolling_window must be at least 1".into(),
            ));
        }
        if self.source.gid.trim().is_empty() {
            return Err(ConfigError::Invalid("source.gid must not be blank".into()));
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "source.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

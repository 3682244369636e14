use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::cameron::ScanPolicy;
use crate::logging::LogConfig;
use crate::models::Units;
use crate::report::OutputFormat;
use crate::riegel::RiegelModel;
use crate::vo2max::SolverSettings;

/// Main application configuration
///
/// Every section falls back to its defaults, so a file only needs the keys
/// it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// VO2max search parameters
    pub vo2max: SolverSettings,

    /// Cameron validity scan
    pub cameron: CameronSettings,

    /// Riegel fatigue exponent
    pub riegel: RiegelModel,

    /// Report defaults
    pub output: OutputSettings,

    /// Logging
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        let now = Utc::now();
        ConfigMetadata {
            version: "1.0".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameronSettings {
    pub scan_policy: ScanPolicy,
}

/// Report defaults, overridden by command line flags
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Units for distance labels
    pub units: Units,

    /// Report format when `--format` is not given
    pub format: OutputFormat,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        PredictorConfig {
            metadata: ConfigMetadata::default(),
            vo2max: SolverSettings::default(),
            cameron: CameronSettings::default(),
            riegel: RiegelModel::default(),
            output: OutputSettings::default(),
            logging: LogConfig::default(),
        }
    }
}

impl PredictorConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;

        let config: PredictorConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        config.validate()?;
        debug!(path = %path.as_ref().display(), "configuration loaded");

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content).with_context(|| {
            format!("Failed to write config file: {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".racepred")
            .join("config.toml")
    }

    /// Load the default file, falling back to defaults when it is missing or invalid
    /// Write a default configuration to a path that does not exist yet
    pub fn init_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            bail!("Config file already exists: {}", path.display());
        }

        let mut config = Self::default();
        config.save_to_file(path)?;
        debug!(path = %path.display(), "wrote default configuration");
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();

        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Self::default();
        }

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %config_path.display(), error = %err, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Reject settings the models cannot run with
    pub fn validate(&self) -> Result<()> {
        let solver = &self.vo2max;
        if !(solver.tolerance.is_finite() && solver.tolerance > 0.0) {
            bail!("vo2max.tolerance must be positive, got {}", solver.tolerance);
        }
        if !(solver.step_minutes.is_finite() && solver.step_minutes > 0.0) {
            bail!(
                "vo2max.step_minutes must be positive, got {}",
                solver.step_minutes
            );
        }
        if solver.max_iterations == 0 {
            bail!("vo2max.max_iterations must be at least 1");
        }
        if !(self.riegel.exponent.is_finite() && self.riegel.exponent > 0.0) {
            bail!("riegel.exponent must be positive, got {}", self.riegel.exponent);
        }
        Ok(())
    }
}

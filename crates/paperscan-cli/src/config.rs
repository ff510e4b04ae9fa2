//! Configuration loading from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use paperscan_crawl::{Archive, ConfigError, PartitionPolicy, PdfToText};
use serde::Deserialize;

/// Global configuration for paperscan
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub archive: Archive,
    pub workers: WorkersConfig,
    pub extract: ExtractConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Result file written by `crawl`
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("result.jsonl"),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WorkersConfig {
    pub default: usize,
    pub max: usize,
    pub policy: PartitionPolicy,
}

impl Default for WorkersConfig {
    fn default() -> Self {
        Self {
            default: 1,
            max: 64,
            policy: PartitionPolicy::Contiguous,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// pdftotext executable
    pub command: String,
    pub timeout_secs: u64,
    /// Parent directory for staging files (system temp dir if unset)
    pub staging_dir: Option<PathBuf>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        let defaults = PdfToText::default();
        Self {
            command: defaults.command,
            timeout_secs: defaults.timeout.as_secs(),
            staging_dir: None,
        }
    }
}

impl ExtractConfig {
    pub fn extractor(&self) -> PdfToText {
        PdfToText {
            command: self.command.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            staging_root: self.staging_dir.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout, body included
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./paperscan.toml (current directory)
    /// 2. ~/.config/paperscan/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("paperscan.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "paperscan") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject settings that would make every fetch or extraction fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extract.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("extract.timeout_secs"));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("http.timeout_secs"));
        }
        Ok(())
    }
}

//! Configuration file.
//!
//! An optional TOML file can preset the sponge parameters and pick the
//! entropy source. Command-line flags take precedence over it.
//!
//! ```toml
//! [spec]
//! rate = 1344
//! capacity = 256
//! output_size = 512
//!
//! [entropy]
//! source = "device"
//! device = "/dev/urandom"
//! ```

use crate::entropy::{DeviceSource, EntropySource, OsSource, DEFAULT_ENTROPY_DEVICE};
use crate::spec::GeneralizedSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(String),
    #[error("failed to parse config file: {0}")]
    Parse(String),
}

/// Where the seed comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A random-byte device.
    #[default]
    Device,
    /// The getrandom syscall.
    Os,
}

/// Entropy source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntropyConfig {
    /// Source kind.
    pub source: SourceKind,
    /// Device path, used when `source` is `device`.
    pub device: PathBuf,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Device,
            device: PathBuf::from(DEFAULT_ENTROPY_DEVICE),
        }
    }
}

impl EntropyConfig {
    /// Builds the configured source.
    pub fn build(&self) -> Box<dyn EntropySource> {
        match self.source {
            SourceKind::Device => Box::new(DeviceSource::new(&self.device)),
            SourceKind::Os => Box::new(OsSource),
        }
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Sponge parameters, all optional.
    pub spec: GeneralizedSpec,
    /// Entropy source.
    pub entropy: EntropyConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

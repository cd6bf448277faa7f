use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::cli::CliConfig;
use super::constants::CONFIG_FILE_NAME;
use crate::domain::metrics::EncodingMode;

// =============================================================================
// File Config
// =============================================================================

/// Raw config file contents. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    mode: Option<EncodingMode>,
    #[serde(flatten)]
    extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Unknown top-level keys, sorted
    fn unknown_fields(&self) -> Vec<String> {
        match &self.extra {
            serde_json::Value::Object(map) => {
                let mut keys: Vec<String> = map.keys().cloned().collect();
                keys.sort();
                keys
            }
            _ => Vec::new(),
        }
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        let unknown = self.unknown_fields();
        if !unknown.is_empty() {
            tracing::warn!(
                fields = %unknown.join(", "),
                "Unknown fields in config file (possible typos)"
            );
        }
    }
}

// =============================================================================
// Encoder Config
// =============================================================================

/// Effective encoder configuration.
///
/// The default configuration is what the canonical encoder uses; nothing is
/// required to encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub mode: EncodingMode,
}

impl EncoderConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. CLI-specified config path OR local directory config
    /// 3. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let path = match cli.config {
            Some(ref path) => Some(path.clone()),
            None => {
                let local = PathBuf::from(CONFIG_FILE_NAME);
                local.exists().then_some(local)
            }
        };
        Self::load_layered(path.as_deref(), cli.mode)
    }

    /// Layer defaults, an optional config file, and a mode override
    pub fn load_layered(path: Option<&Path>, mode: Option<EncodingMode>) -> Result<Self> {
        tracing::debug!("Loading encoder configuration");

        let file_config = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                let config = FileConfig::load_from_file(path)?;
                config.warn_unknown_fields();
                config
            }
            None => FileConfig::default(),
        };

        let config = Self {
            mode: mode.or(file_config.mode).unwrap_or_default(),
        };
        config.validate()?;

        tracing::debug!(mode = %config.mode, "Encoder configuration loaded");
        Ok(config)
    }

    /// Every combination of settings is valid
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}

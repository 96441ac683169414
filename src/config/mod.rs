//! Configuration loaded from TOML.
//!
//! ```toml
//! [text]
//! pretty = false
//!
//! [logging]
//! filter = "info"
//! ```
//!
//! Every section and key is optional; missing ones take their defaults.

use anyhow::Context;
use json_types::TextCodec;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SleuthConfig {
    /// Text codec settings.
    pub text: TextCodec,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl SleuthConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse configuration TOML")
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Text codec described by this configuration.
    pub fn text_codec(&self) -> TextCodec {
        self.text.clone()
    }
}

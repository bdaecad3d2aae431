//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.speclint.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Registry settings.
    #[serde(default)]
    pub registry: RegistrySettings,

    /// Analyzer settings.
    #[serde(default)]
    pub analyzer: AnalyzerSettings,
}

/// Registry connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Base URL of the registry service.
    #[serde(default)]
    pub url: Option<String>,

    /// Bearer token attached to registry requests.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            url: None,
            api_token: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    60
}

/// Analyzer backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerSettings {
    /// Compiler command to invoke.
    #[serde(default = "default_command")]
    pub command: String,

    /// Ruleset file passed to the compiler.
    #[serde(default)]
    pub ruleset: Option<PathBuf>,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            command: default_command(),
            ruleset: None,
        }
    }
}

fn default_command() -> String {
    "tsp".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".speclint.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings; optional
    /// flags only override when explicitly provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref url) = args.registry_url {
            self.registry.url = Some(url.clone());
        }
        if let Some(ref token) = args.api_token {
            self.registry.api_token = Some(token.clone());
        }
        if let Some(timeout) = args.timeout {
            self.registry.timeout_seconds = timeout;
        }
        if let Some(ref compiler) = args.compiler {
            self.analyzer.command = compiler.clone();
        }
        if let Some(ref ruleset) = args.ruleset {
            self.analyzer.ruleset = Some(ruleset.clone());
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

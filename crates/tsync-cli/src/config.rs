//! `tsync.toml` parsing and resolution
//!
//! Values resolve with the precedence CLI flag > environment variable >
//! config file > built-in default. Clap folds the first two together, so
//! this module only merges overrides onto the parsed file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tsync_bridge::BridgeConfig;

use crate::error::{CliError, Result};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "tsync.toml";

fn default_command() -> String {
    "figma-bridge".to_string()
}

/// `[bridge]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeSection {
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
            timeout_secs: None,
        }
    }
}

/// Parsed `tsync.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote file to sync against
    #[serde(default)]
    pub file_key: Option<String>,

    /// Default token file, relative to the config file
    #[serde(default)]
    pub tokens: Option<PathBuf>,

    #[serde(default)]
    pub bridge: BridgeSection,
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub file_key: Option<String>,
    pub bridge: Option<String>,
}

impl Config {
    /// Parse a config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load the config file.
    ///
    /// An explicitly requested file must exist; the default file is optional.
    /// A relative `tokens` path is rebased onto the config file's directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            if explicit.is_some() {
                return Err(CliError::user(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            return Ok(Self::default());
        }

        let mut config = Self::parse(&fs::read_to_string(path)?)?;
        if let (Some(tokens), Some(dir)) = (&config.tokens, path.parent())
            && tokens.is_relative()
        {
            config.tokens = Some(dir.join(tokens));
        }
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply command-line/environment overrides on top of the file values
    pub fn merge(&mut self, overrides: &Overrides) {
        if let Some(key) = &overrides.file_key {
            self.file_key = Some(key.clone());
        }
        if let Some(command) = &overrides.bridge {
            self.bridge.command = command.clone();
        }
    }

    pub fn file_key(&self) -> Result<String> {
        self.file_key.clone().ok_or_else(|| {
            CliError::user(
                "No file key configured. Pass --file-key, set TSYNC_FILE_KEY, or add file_key to tsync.toml",
            )
        })
    }

    /// Token file to read: the positional argument wins over the config
    pub fn tokens_path(&self, arg: Option<PathBuf>) -> Result<PathBuf> {
        arg.or_else(|| self.tokens.clone()).ok_or_else(|| {
            CliError::user("No token file given. Pass a path or add tokens to tsync.toml")
        })
    }

    pub fn bridge_config(&self) -> BridgeConfig {
        let config = BridgeConfig::new(self.bridge.command.clone()).with_args(self.bridge.args.clone());
        match self.bridge.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

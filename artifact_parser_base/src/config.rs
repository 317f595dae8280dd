//! # Registry Configuration
//!
//! Runtime preferences for building and dispatching through a
//! [`crate::contracts::ParserRegistry`]. Values come from a TOML file, with
//! environment variables supplying the defaults for omitted keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::path::{Path, PathBuf};

/// Env var: `true`, `1`, `yes` or `on` enables per-dispatch debug logging
pub const TRACE_DISPATCH_ENV: &str = "ARTIFACT_PARSER_TRACE_DISPATCH";

/// Env var: comma-separated parser names to leave out of the registry
pub const DISABLED_PARSERS_ENV: &str = "ARTIFACT_PARSER_DISABLED_PARSERS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration for registry construction and dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Parsers skipped at registration time
    pub disabled_parsers: BTreeSet<String>,

    /// Log every dispatch at debug level
    pub trace_dispatch: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            disabled_parsers: env::var(DISABLED_PARSERS_ENV)
                .map(|v| parse_name_list(&v))
                .unwrap_or_default(),
            trace_dispatch: env::var(TRACE_DISPATCH_ENV)
                .ok()
                .and_then(|v| {
                    let flag = parse_flag(&v);
                    if flag.is_none() {
                        log::warn!("Ignoring {}='{}': not a boolean", TRACE_DISPATCH_ENV, v);
                    }
                    flag
                })
                .unwrap_or(false),
        }
    }
}

impl RegistryConfig {
    /// Configuration with every parser enabled and tracing off, ignoring the
    /// environment
    pub fn new() -> Self {
        Self {
            disabled_parsers: BTreeSet::new(),
            trace_dispatch: false,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Disable a parser by name
    pub fn with_disabled(mut self, parser: impl Into<String>) -> Self {
        self.disabled_parsers.insert(parser.into());
        self
    }

    pub fn with_trace_dispatch(mut self, enabled: bool) -> Self {
        self.trace_dispatch = enabled;
        self
    }

    pub fn is_disabled(&self, parser: &str) -> bool {
        self.disabled_parsers.contains(parser)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn parse_name_list(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

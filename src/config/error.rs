//! Configuration errors.

use std::path::PathBuf;

/// Errors raised while loading or resolving configuration. All are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config is missing required key: '{key}'")]
    MissingKey { key: String },

    #[error(
        "Active profile '{name}' not found in 'log_profiles'. Available profiles: {}",
        format_available(available)
    )]
    UnknownProfile { name: String, available: Vec<String> },

    #[error("max_entries_per_chunk must be at least 1 (got {value})")]
    InvalidMaxEntries { value: usize },

    #[error("Invalid regex in profile '{profile}': '{pattern}': {source}")]
    InvalidPattern {
        profile: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Could not determine home directory")]
    NoHomeDir,
}

impl ConfigError {
    pub(crate) fn missing(key: impl Into<String>) -> Self {
        ConfigError::MissingKey { key: key.into() }
    }
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "(none)".to_string()
    } else {
        available.join(", ")
    }
}

//! Configuration management for logseg
//!
//! The configuration names the input log, the output base directory, and a
//! table of log profiles. One profile is active per run; its
//! `log_start_regex` decides where entries begin.
//!
//! ```toml
//! input_log_file = "logs/app.log"
//! output_chunk_dir = "chunks"
//! active_profile = "java"
//! max_entries_per_chunk = 500
//!
//! [log_profiles.java]
//! log_start_regex = '\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}'
//! description = "Java application logs"
//! ```

mod error;
mod io;
mod types;

pub use error::ConfigError;
pub use types::*;

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

impl Config {
    /// Get the config file path (~/.config/logseg/config.toml)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        io::default_path()
    }

    /// Load configuration from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => io::load_from(path),
            None => io::load_from(&io::default_path()?),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        io::load_from(path)
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Starter configuration written by `logseg config init`.
    pub fn example() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "java".to_string(),
            LogProfile::new(
                r"\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}",
                "Java/Logback style logs starting with an ISO timestamp",
            ),
        );
        profiles.insert(
            "syslog".to_string(),
            LogProfile::new(
                r"[A-Z][a-z]{2} [ \d]\d \d{2}:\d{2}:\d{2} ",
                "BSD syslog lines (e.g. 'Jan  5 10:00:00 host app: ...')",
            ),
        );
        profiles.insert(
            "bracketed".to_string(),
            LogProfile::new(r"\[", "Entries starting with a bracketed prefix"),
        );

        Self {
            input_log_file: Some(PathBuf::from("logs/app.log")),
            output_chunk_dir: Some(PathBuf::from("chunks")),
            active_profile: Some("java".to_string()),
            log_profiles: Some(profiles),
            ..Self::default()
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(ref input) = overrides.input {
            self.input_log_file = Some(input.clone());
        }
        if let Some(ref dir) = overrides.output_dir {
            self.output_chunk_dir = Some(dir.clone());
        }
        if let Some(ref profile) = overrides.profile {
            self.active_profile = Some(profile.clone());
        }
        if let Some(max) = overrides.max_entries {
            self.max_entries_per_chunk = max;
        }
        if let Some(policy) = overrides.orphan_policy {
            self.orphan_lines = policy;
        }
        self
    }

    /// Configured profile names, sorted.
    pub fn profile_names(&self) -> Vec<String> {
        self.log_profiles
            .as_ref()
            .map(|profiles| profiles.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Resolve into the settings for one run.
    ///
    /// Checks required keys, the active profile, and the entry cap. The
    /// boundary pattern is compiled by the pipeline before any output is
    /// touched.
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        let input_path = self
            .input_log_file
            .clone()
            .ok_or_else(|| ConfigError::missing("input_log_file"))?;
        let output_dir = self
            .output_chunk_dir
            .clone()
            .ok_or_else(|| ConfigError::missing("output_chunk_dir"))?;
        let profile_name = self
            .active_profile
            .clone()
            .ok_or_else(|| ConfigError::missing("active_profile"))?;
        let profiles = self
            .log_profiles
            .as_ref()
            .ok_or_else(|| ConfigError::missing("log_profiles"))?;

        let profile = profiles
            .get(&profile_name)
            .ok_or_else(|| ConfigError::UnknownProfile {
                name: profile_name.clone(),
                available: profiles.keys().cloned().collect(),
            })?;
        let pattern = profile.log_start_regex.as_deref().ok_or_else(|| {
            ConfigError::missing(format!("log_profiles.{}.log_start_regex", profile_name))
        })?;

        if self.max_entries_per_chunk == 0 {
            return Err(ConfigError::InvalidMaxEntries { value: 0 });
        }

        Ok(RunConfig::new(input_path, output_dir, &profile_name, pattern)
            .max_entries(self.max_entries_per_chunk)
            .orphan_policy(self.orphan_lines))
    }
}

//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::segment::OrphanPolicy;

/// Main configuration structure.
///
/// Required keys are kept optional here so that a missing one can be
/// reported by name from [`Config::run_config`](crate::Config::run_config)
/// instead of as a generic parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log file (or directory of `.log` files) to segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_log_file: Option<PathBuf>,
    /// Base directory for chunk output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_chunk_dir: Option<PathBuf>,
    /// Key into `log_profiles`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_profile: Option<String>,
    #[serde(default = "default_max_entries_per_chunk")]
    pub max_entries_per_chunk: usize,
    /// Handling of lines before the first entry ("drop" or "preamble")
    #[serde(default)]
    pub orphan_lines: OrphanPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_profiles: Option<BTreeMap<String, LogProfile>>,
}

pub fn default_max_entries_per_chunk() -> usize {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_log_file: None,
            output_chunk_dir: None,
            active_profile: None,
            max_entries_per_chunk: default_max_entries_per_chunk(),
            orphan_lines: OrphanPolicy::default(),
            log_profiles: None,
        }
    }
}

/// A named log format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogProfile {
    /// Regex matching the first line of an entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_start_regex: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl LogProfile {
    pub fn new(log_start_regex: &str, description: &str) -> Self {
        Self {
            log_start_regex: Some(log_start_regex.to_string()),
            description: description.to_string(),
        }
    }
}

/// Command-line values that take priority over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub profile: Option<String>,
    pub max_entries: Option<usize>,
    pub orphan_policy: Option<OrphanPolicy>,
}

/// Fully resolved settings for one segmentation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input_path: PathBuf,
    /// Base output directory; chunks land in [`RunConfig::chunk_dir`]
    pub output_dir: PathBuf,
    pub profile_name: String,
    pub boundary_pattern: String,
    pub max_entries_per_chunk: usize,
    pub orphan_policy: OrphanPolicy,
}

impl RunConfig {
    /// Settings with the default entry cap and orphan policy.
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        profile_name: &str,
        boundary_pattern: &str,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            profile_name: profile_name.to_string(),
            boundary_pattern: boundary_pattern.to_string(),
            max_entries_per_chunk: default_max_entries_per_chunk(),
            orphan_policy: OrphanPolicy::default(),
        }
    }

    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries_per_chunk = max_entries;
        self
    }

    pub fn orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    /// Same settings applied to another input file.
    pub fn for_input(&self, input_path: &Path) -> Self {
        Self {
            input_path: input_path.to_path_buf(),
            ..self.clone()
        }
    }

    /// Input file name without its final extension (`app.2024.log` -> `app.2024`).
    pub fn input_base_name(&self) -> String {
        self.input_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Destination of the chunks: `output_dir/profile_name/input_base_name`.
    pub fn chunk_dir(&self) -> PathBuf {
        self.output_dir
            .join(&self.profile_name)
            .join(self.input_base_name())
    }
}

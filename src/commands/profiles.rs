//! Profiles command handler

use anyhow::Result;
use std::path::Path;

use logseg::{BoundaryPattern, Config};

use super::load_config;

/// List configured profiles, marking the active one.
#[cfg(not(tarpaulin_include))]
pub fn handle(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", format_profiles(&config));
    Ok(())
}

/// Render the profile table, one profile per block.
pub(crate) fn format_profiles(config: &Config) -> String {
    let profiles = match &config.log_profiles {
        Some(profiles) if !profiles.is_empty() => profiles,
        _ => return "No log profiles configured.\n".to_string(),
    };

    let active = config.active_profile.as_deref();
    let mut out = String::new();
    for (name, profile) in profiles {
        let marker = if Some(name.as_str()) == active { "*" } else { " " };
        let description: &str = if profile.description.is_empty() {
            "No description"
        } else {
            &profile.description
        };
        out.push_str(&format!("{} {} - {}\n", marker, name, description));

        match profile.log_start_regex.as_deref() {
            Some(pattern) => {
                let status = match BoundaryPattern::new(pattern) {
                    Ok(_) => String::new(),
                    Err(_) => " (invalid)".to_string(),
                };
                out.push_str(&format!("    pattern: {}{}\n", pattern, status));
            }
            None => out.push_str("    pattern: (missing log_start_regex)\n"),
        }
    }
    out
}

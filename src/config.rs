//! Application configuration management.
//!
//! Persistent defaults that apply to every run, loaded from a
//! platform-specific config file: extra exclusion patterns and whether
//! hidden files are skipped. CLI flags layer on top of these.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Extra gitignore-style exclusion patterns, applied to both sides.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Skip hidden files and directories by default.
    #[serde(default)]
    pub skip_hidden: bool,
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// Falls back to defaults when the file is missing or unreadable;
    /// a config problem should never block a comparison.
    #[must_use]
    pub fn load() -> Self {
        match Self::load_internal() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn load_internal() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Get the default platform-specific configuration path.
    fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("io", "treediff", "treediff")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = Config::default();
        assert!(config.exclude.is_empty());
        assert!(!config.skip_hidden);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config {
            exclude: vec!["*.log".to_string()],
            skip_hidden: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.exclude, config.exclude);
        assert_eq!(back.skip_hidden, config.skip_hidden);
    }

    #[test]
    fn test_partial_config_uses_field_defaults() {
        let back: Config = serde_json::from_str("{}").unwrap();
        assert!(back.exclude.is_empty());
        assert!(!back.skip_hidden);
    }
}

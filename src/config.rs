//! Configuration loader/writer plus strongly typed settings structures.
//!
//! The default config is embedded at compile time. A user file in the data
//! directory (or one passed with `--config`) replaces it wholesale; missing
//! tables fall back to their defaults.

use crate::data::SectionKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Embed default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "DYNAMIC_SECTIONS_DIR";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Sections in display order
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionKind>,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybinds: KeybindConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Terminal lines per row: 1 shows the detail only, 2+ adds the title
    #[serde(default = "default_row_height")]
    pub row_height: u16,
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    /// Highlight duration for reloaded sections, 0 disables it
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeybindConfig {
    #[serde(default = "default_reload_key")]
    pub reload: String,
    #[serde(default = "default_quit_key")]
    pub quit: String,
}

fn default_sections() -> Vec<SectionKind> {
    vec![
        SectionKind::RandomNumber,
        SectionKind::Static,
        SectionKind::Increasing,
    ]
}

fn default_row_height() -> u16 {
    2
}

fn default_poll_timeout_ms() -> u64 {
    16
}

fn default_highlight_ms() -> u64 {
    300
}

fn default_reload_key() -> String {
    "r".to_string()
}

fn default_quit_key() -> String {
    "q".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            row_height: default_row_height(),
            poll_timeout_ms: default_poll_timeout_ms(),
            highlight_ms: default_highlight_ms(),
        }
    }
}

impl Default for KeybindConfig {
    fn default() -> Self {
        Self {
            reload: default_reload_key(),
            quit: default_quit_key(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            ui: UiConfig::default(),
            keybinds: KeybindConfig::default(),
        }
    }
}

impl Config {
    /// Parse the embedded defaults
    pub fn embedded_default() -> Result<Self> {
        toml::from_str(DEFAULT_CONFIG).context("Failed to parse embedded default config")
    }

    /// Load from `<data dir>/config.toml`, falling back to the embedded defaults
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            tracing::info!("No config at {:?}, using embedded defaults", path);
            Self::embedded_default()
        }
    }

    /// Load a specific config file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        tracing::debug!("Loaded config from {:?}: {} sections", path, config.sections.len());
        Ok(config)
    }

    /// Write this config as pretty TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(())
    }

    /// Get the base data directory (~/.dynamic-sections/)
    /// Can be overridden with the DYNAMIC_SECTIONS_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".dynamic-sections"))
    }

    /// Returns: ~/.dynamic-sections/config.toml
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    /// Returns: ~/.dynamic-sections/dynamic-sections.log
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("dynamic-sections.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_matches_default() {
        let config = Config::embedded_default().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.sections,
            vec![
                SectionKind::RandomNumber,
                SectionKind::Static,
                SectionKind::Increasing
            ]
        );
    }

    #[test]
    fn test_missing_tables_use_defaults() {
        let config: Config = toml::from_str(r#"sections = ["expand_collapse"]"#).unwrap();
        assert_eq!(config.sections, vec![SectionKind::ExpandCollapse]);
        assert_eq!(config.ui, UiConfig::default());
        assert_eq!(config.keybinds.reload, "r");
    }

    #[test]
    fn test_unknown_section_kind_is_rejected() {
        let result: Result<Config, _> = toml::from_str(r#"sections = ["spinning"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.sections = vec![SectionKind::Static, SectionKind::ExpandCollapse];
        config.ui.row_height = 1;
        config.keybinds.reload = "ctrl+r".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

//! # Configuration Persistence
//!
//! User preferences stored in `~/.config/stackwiz/config.json`.
//!
//! Two settings are persisted: the theme name and whether the final summary
//! lets the user jump back to an earlier answer. A missing file means
//! defaults; an unreadable one is reported by [`Config::load_from`] and
//! swallowed by [`Config::load`].
//!
//! The `directories` crate resolves the platform-appropriate config
//! directory.

use crate::ui::theme::Theme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The name of the selected theme (must match a built-in theme name).
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Whether the summary screen allows reconfiguring earlier answers.
    #[serde(default = "default_allow_edit")]
    pub allow_edit: bool,
}

fn default_theme_name() -> String {
    Theme::default_theme().name.to_string()
}

fn default_allow_edit() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            allow_edit: default_allow_edit(),
        }
    }
}

impl Config {
    /// Load configuration from disk. Returns `Config::default()` if the file
    /// does not exist or cannot be parsed.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "ignoring unreadable config");
                Self::default()
            }
        }
    }

    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the current configuration to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save the current configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// The configured theme, falling back to the default for unknown names.
    pub fn theme(&self) -> &'static Theme {
        Theme::by_name(&self.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme, "unknown theme in config, using default");
            Theme::default_theme()
        })
    }

    fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "stackwiz")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}

//! Persisted user settings.
//!
//! Stored as TOML in the platform config directory with get-with-default
//! semantics: a missing file or a missing key never fails, it just falls
//! back to the documented default. The fetch pipeline reads settings at
//! orchestration start and never writes them; only the front-end does.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Background theme for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Default,
    Forest,
    City,
}

impl Background {
    pub fn as_str(&self) -> &'static str {
        match self {
            Background::Default => "default",
            Background::Forest => "forest",
            Background::City => "city",
        }
    }

    pub const fn all() -> &'static [Background] {
        &[Background::Default, Background::Forest, Background::City]
    }
}

impl std::fmt::Display for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_city() -> String {
    "Gonder".to_string()
}

const fn default_use_celsius() -> bool {
    true
}

/// User preferences carried across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// City fetched when no explicit query is given.
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Render temperatures in Celsius (Fahrenheit otherwise).
    #[serde(default = "default_use_celsius")]
    pub use_celsius: bool,

    /// Use the decorated icon set instead of the flat one.
    #[serde(default)]
    pub use_3d_icons: bool,

    #[serde(default)]
    pub background: Background,

    /// Opt-in for weather alerts. Off until the user asks for them.
    #[serde(default)]
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            use_celsius: true,
            use_3d_icons: false,
            background: Background::Default,
            notifications_enabled: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no settings file, start from defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }

    /// Reset every preference to its default and persist the result.
    pub fn clear() -> Result<Self> {
        let settings = Self::default();
        settings.save()?;
        Ok(settings)
    }

    /// Path to the settings file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("settings.toml"))
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::appearance::ThemeMode;
use crate::clock::{ClockFace, HourFormat};
use crate::quotes::QuoteSelection;
use crate::storage::FileBackend;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub clock: ClockConfig,
    pub appearance: AppearanceConfig,
    pub quotes: QuotesConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Face shown at startup: "digital" or "analog"
    pub face: ClockFace,
    /// "12h" or "24h" for the digital face
    pub hour_format: HourFormat,
    /// Redraw interval in milliseconds
    pub tick_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            face: ClockFace::Digital,
            hour_format: HourFormat::Twelve,
            tick_ms: 1000,
        }
    }
}

impl ClockConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(100))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Theme used until the user toggles one
    pub theme: ThemeMode,
    /// Accent color override as hex (#rrggbb)
    pub accent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotesConfig {
    /// "random" picks anew on every view, "daily" keeps one per day
    pub selection: QuoteSelection,
    /// Appended to the built-in quotes
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage file; defaults to the user data directory
    pub path: Option<String>,
}

impl StorageConfig {
    pub fn resolve_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => PathBuf::from(shellexpand::tilde(path).as_ref()),
            None => FileBackend::default_path(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

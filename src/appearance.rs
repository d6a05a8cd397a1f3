//! Light/dark theme and backdrop preferences.
//!
//! The theme lives in a `watch` channel so every view holding a receiver
//! learns about a toggle without polling the store. Both preferences are
//! written through to storage as soon as they change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::watch;

use crate::storage::{Storage, StorageError, BACKGROUND_KEY, THEME_KEY};

/// Light or dark rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide theme with change notification
pub struct ThemeStore {
    tx: watch::Sender<ThemeMode>,
    storage: Storage,
}

impl ThemeStore {
    /// Restore the stored theme, or use `fallback` when none is stored
    pub fn load(storage: Storage, fallback: ThemeMode) -> Self {
        let mode = match storage.get_item(THEME_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Unknown stored theme '{}', using {}", raw, fallback);
                fallback
            }),
            None => fallback,
        };
        let (tx, _) = watch::channel(mode);
        Self { tx, storage }
    }

    pub fn current(&self) -> ThemeMode {
        *self.tx.borrow()
    }

    /// Receiver that observes every later change
    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.tx.subscribe()
    }

    /// Flip light/dark and notify subscribers
    pub fn toggle(&self) -> Result<ThemeMode, StorageError> {
        let next = self.current().toggled();
        self.set(next)?;
        Ok(next)
    }

    pub fn set(&self, mode: ThemeMode) -> Result<(), StorageError> {
        self.tx.send_if_modified(|current| {
            let changed = *current != mode;
            *current = mode;
            changed
        });
        tracing::debug!("Theme set to {}", mode);
        self.storage.set_item(THEME_KEY, mode.as_str())
    }
}

/// Full-screen decorative backdrops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Background {
    #[default]
    Default,
    Gradient,
    Particles,
    Waves,
    Geometric,
}

impl Background {
    pub const ALL: [Background; 5] = [
        Background::Default,
        Background::Gradient,
        Background::Particles,
        Background::Waves,
        Background::Geometric,
    ];

    /// Stored identifier
    pub fn key(self) -> &'static str {
        match self {
            Background::Default => "default",
            Background::Gradient => "gradient",
            Background::Particles => "particles",
            Background::Waves => "waves",
            Background::Geometric => "geometric",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Background::Default => "Default",
            Background::Gradient => "Gradient",
            Background::Particles => "Particles",
            Background::Waves => "Waves",
            Background::Geometric => "Geometric",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bg| bg.key() == key)
    }

    /// Resolve a stored identifier, falling back to the default backdrop
    /// for anything unrecognized (including retired values like "nature")
    pub fn from_key(key: &str) -> Self {
        Self::parse(key).unwrap_or_default()
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|bg| *bg == self).unwrap_or(0)
    }
}

/// Stored backdrop choice
pub struct BackgroundStore {
    raw: String,
    storage: Storage,
}

impl BackgroundStore {
    pub fn load(storage: Storage) -> Self {
        let raw = storage
            .get_item(BACKGROUND_KEY)
            .unwrap_or_else(|| Background::Default.key().to_string());
        if Background::parse(&raw).is_none() {
            tracing::info!("Unknown stored background '{}', using default", raw);
        }
        Self { raw, storage }
    }

    /// Resolved backdrop; unrecognized stored values give the default
    pub fn current(&self) -> Background {
        Background::from_key(&self.raw)
    }

    /// Switch backdrop and persist right away
    pub fn set(&mut self, background: Background) -> Result<(), StorageError> {
        self.raw = background.key().to_string();
        tracing::debug!("Background set to {}", self.raw);
        self.storage.set_item(BACKGROUND_KEY, &self.raw)
    }
}

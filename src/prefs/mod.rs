//! Theme preference management.
//!
//! A single two-valued preference (`dark`/`light`) persisted under the key
//! `globalcare-theme`. Absent a persisted value the system signal applies
//! and keeps applying as it changes; once the user toggles, the system
//! signal is permanently overridden (until the persisted preference is
//! cleared externally). Storage failures degrade to session-only state.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key for the theme preference
pub const THEME_KEY: &str = "globalcare-theme";

/// Persistence is blocked (disabled storage, unreadable file, ...)
#[derive(Debug, Error)]
#[error("preference storage unavailable: {0}")]
pub struct StorageUnavailable(pub String);

/// The two-valued theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// The opposite theme
    pub fn flipped(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => anyhow::bail!("Unknown theme: {}", s),
        }
    }
}

/// Key-value store for persisted preferences
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageUnavailable>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageUnavailable>;
}

/// Preference store backed by a flat JSON map file
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StorageUnavailable> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| StorageUnavailable(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| StorageUnavailable(e.to_string()))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageUnavailable> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageUnavailable> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageUnavailable(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(&map).map_err(|e| StorageUnavailable(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| StorageUnavailable(e.to_string()))
    }
}

/// In-memory preference store (tests)
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageUnavailable> {
        let map = self
            .map
            .lock()
            .map_err(|_| StorageUnavailable("poisoned lock".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageUnavailable> {
        let mut map = self
            .map
            .lock()
            .map_err(|_| StorageUnavailable("poisoned lock".to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preference store that always fails (tests the degraded path)
pub struct UnavailableStore;

impl PreferenceStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageUnavailable> {
        Err(StorageUnavailable("storage disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageUnavailable> {
        Err(StorageUnavailable("storage disabled".to_string()))
    }
}

/// Applies and persists the theme preference
pub struct ThemeManager {
    store: Box<dyn PreferenceStore>,
    applied: Theme,
    user_set: bool,
}

impl ThemeManager {
    /// Initialize from the persisted preference, falling back to the
    /// system signal when none is stored (or storage is unavailable).
    pub fn init(store: Box<dyn PreferenceStore>, system: Theme) -> Self {
        let (applied, user_set) = match store.get(THEME_KEY) {
            Ok(Some(value)) => match value.parse::<Theme>() {
                Ok(theme) => (theme, true),
                Err(_) => {
                    tracing::warn!("ignoring unrecognized persisted theme: {}", value);
                    (system, false)
                }
            },
            Ok(None) => (system, false),
            Err(e) => {
                tracing::warn!("{}; theme will not be remembered", e);
                (system, false)
            }
        };

        Self {
            store,
            applied,
            user_set,
        }
    }

    /// The theme currently applied
    pub fn applied(&self) -> Theme {
        self.applied
    }

    /// The document-wide attribute pair representing the applied theme
    pub fn attribute(&self) -> (&'static str, &'static str) {
        ("data-theme", self.applied.as_str())
    }

    /// Flip the theme and persist the new value. The flip applies for the
    /// session even when persistence fails.
    pub fn toggle(&mut self) -> Theme {
        self.applied = self.applied.flipped();
        self.user_set = true;

        if let Err(e) = self.store.set(THEME_KEY, self.applied.as_str()) {
            tracing::warn!("{}; theme applies for this session only", e);
        }

        self.applied
    }

    /// React to a system preference change. Has effect only while no
    /// explicit user preference exists.
    pub fn on_system_change(&mut self, system: Theme) {
        if !self.user_set {
            self.applied = system;
        }
    }
}

//! Configuration for the content origin and local state.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (GLOBALCARE_CONTENT_URL, GLOBALCARE_HOME)
//! 2. Config file (.globalcare/config.yaml)
//! 3. Defaults (http://localhost:8000/content, ~/.globalcare)
//!
//! Config file discovery searches the current directory and its parents
//! for .globalcare/config.yaml.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::controller::PresentationSettings;

/// Default content origin when nothing is configured
pub const DEFAULT_CONTENT_URL: &str = "http://localhost:8000/content";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub presentation: Option<PresentationConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Base URL of the content origin
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Local state directory (preferences live here)
    pub home: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresentationConfig {
    pub debounce_ms: Option<u64>,
    pub skeleton_count: Option<usize>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Base URL of the content origin
    pub content_url: String,
    /// Absolute path to local state (~/.globalcare by default)
    pub home: PathBuf,
    /// Presentation tunables (debounce, skeleton count)
    pub presentation: PresentationSettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Path to the persisted preferences file
    pub fn preferences_path(&self) -> PathBuf {
        self.home.join("preferences.json")
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".globalcare").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse a config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".globalcare");

    let config_file = find_config_file();

    let file = match &config_file {
        Some(path) => Some(load_config_file(path)?),
        None => None,
    };

    let content_url = if let Ok(env_url) = std::env::var("GLOBALCARE_CONTENT_URL") {
        env_url
    } else if let Some(url) = file.as_ref().and_then(|f| f.content.url.clone()) {
        url
    } else {
        DEFAULT_CONTENT_URL.to_string()
    };

    let home = if let Ok(env_home) = std::env::var("GLOBALCARE_HOME") {
        PathBuf::from(env_home)
    } else if let Some(home) = file.as_ref().and_then(|f| f.paths.home.clone()) {
        PathBuf::from(home)
    } else {
        default_home
    };

    let defaults = PresentationSettings::default();
    let presentation = match file.as_ref().and_then(|f| f.presentation.as_ref()) {
        Some(p) => PresentationSettings {
            debounce: p
                .debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce),
            skeleton_count: p.skeleton_count.unwrap_or(defaults.skeleton_count),
        },
        None => defaults,
    };

    Ok(ResolvedConfig {
        content_url,
        home,
        presentation,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

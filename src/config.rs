//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$EMLINKS_CONFIG` (environment variable)
//! 2. `~/.config/emlinks/config.toml` (Linux/macOS)
//!    `%APPDATA%\emlinks\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Which files are picked up.
    pub scan: ScanConfig,
    /// Report rendering.
    pub output: OutputConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

/// File discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extension (without the dot) of message files.
    pub extension: String,
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format: "text" or "json".
    pub format: String,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "eml".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

impl OutputConfig {
    /// Whether the configured format asks for JSON.
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

// ── Load ────────────────────────────────────────────────────────

/// Where the active configuration came from.
///
/// Loading happens before logging is set up, so the outcome is returned
/// and reported once a subscriber exists.
#[derive(Debug)]
pub enum ConfigSource {
    /// No config file exists; built-in defaults.
    Defaults,
    /// Loaded from this file.
    File(PathBuf),
    /// The file exists but could not be read or parsed; built-in defaults.
    Fallback { path: PathBuf, error: String },
}

impl ConfigSource {
    /// Emit the outcome through `tracing`.
    pub fn log(&self) {
        match self {
            Self::Defaults => tracing::debug!("No config file, using defaults"),
            Self::File(path) => tracing::info!(path = %path.display(), "Loaded config"),
            Self::Fallback { path, error } => tracing::warn!(
                path = %path.display(),
                error = %error,
                "Failed to load config, using defaults"
            ),
        }
    }
}

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> (Config, ConfigSource) {
    match config_file_path() {
        Some(path) if path.exists() => load_config_from(path),
        _ => (Config::default(), ConfigSource::Defaults),
    }
}

/// Load configuration from an explicit file, falling back to defaults.
pub fn load_config_from(path: PathBuf) -> (Config, ConfigSource) {
    let parsed = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|contents| toml::from_str::<Config>(&contents).map_err(|e| e.to_string()));

    match parsed {
        Ok(cfg) => (cfg, ConfigSource::File(path)),
        Err(error) => (Config::default(), ConfigSource::Fallback { path, error }),
    }
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var("EMLINKS_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("emlinks").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("emlinks")
}

//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.atlas/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::rest_countries::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// "off", "error", "warn", "info", "debug" or "trace"
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "atlas.log";
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub log_level: log::LevelFilter,
    pub log_file: PathBuf,
    /// Search to run once the initial listing is requested
    pub initial_query: Option<String>,
}

/// Values taken from the command line (None = flag not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub query: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.atlas/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".atlas").join("config.toml"))
}

/// Load config from `~/.atlas/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AtlasConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AtlasConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(AtlasConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<AtlasConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AtlasConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AtlasConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Atlas Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "https://restcountries.com/v3.1"   # Or set ATLAS_BASE_URL
# timeout_secs = 10                             # Or set ATLAS_TIMEOUT_SECS

# [logging]
# level = "debug"        # "off", "error", "warn", "info", "debug", "trace"
# file = "atlas.log"     # Relative paths are resolved against the working directory
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AtlasConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("ATLAS_BASE_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: CLI → env → config → default
    let timeout_secs = cli
        .timeout_secs
        .or_else(|| {
            std::env::var("ATLAS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
        })
        .or(config.api.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    // A zero timeout would fail every request immediately
    let timeout_secs = if timeout_secs == 0 {
        warn!("timeout_secs = 0 is not usable, using {}", DEFAULT_TIMEOUT_SECS);
        DEFAULT_TIMEOUT_SECS
    } else {
        timeout_secs
    };

    let log_level = match config.logging.level.as_deref() {
        Some(level) => level.parse().unwrap_or_else(|_| {
            warn!("Unknown log level {:?}, using {}", level, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    ResolvedConfig {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
        log_level,
        log_file: PathBuf::from(
            config
                .logging
                .file
                .as_deref()
                .unwrap_or(DEFAULT_LOG_FILE),
        ),
        initial_query: cli.query.clone().filter(|q| !q.trim().is_empty()),
    }
}

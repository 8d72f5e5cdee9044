//! Application configuration for CodeMerge.
//!
//! User config lives at `~/.codemerge/codemerge.toml`. Environment
//! variables override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CodeMergeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "codemerge.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".codemerge";

// ---------------------------------------------------------------------------
// Config structs (matching codemerge.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upload size limits.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Record TTL and sweep cadence.
    #[serde(default)]
    pub retention: RetentionConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}

/// `[limits]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum size of one uploaded file, in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: usize,

    /// Maximum aggregate size of one upload request, in bytes.
    #[serde(default = "default_max_total_size")]
    pub max_total_size_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
            max_total_size_bytes: default_max_total_size(),
        }
    }
}

fn default_max_file_size() -> usize {
    10 * 1024 * 1024
}
fn default_max_total_size() -> usize {
    50 * 1024 * 1024
}

/// `[retention]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// How long a record lives after upload, in seconds.
    #[serde(default = "default_file_ttl_secs")]
    pub file_ttl_secs: u64,

    /// How often the expiry sweep runs, in seconds.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            file_ttl_secs: default_file_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_file_ttl_secs() -> u64 {
    600
}
fn default_sweep_interval_secs() -> u64 {
    300
}

impl RetentionConfig {
    /// Record TTL as a [`Duration`].
    pub fn file_ttl(&self) -> Duration {
        Duration::from_secs(self.file_ttl_secs)
    }

    /// Sweep interval as a [`Duration`].
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.codemerge/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CodeMergeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.codemerge/codemerge.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk, then apply environment
/// overrides. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    let mut config = if path.exists() {
        load_config_from(&path)?
    } else {
        tracing::debug!(?path, "config file not found, using defaults");
        AppConfig::default()
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load the application config from a specific file path. No environment
/// overrides are applied here.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CodeMergeError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| CodeMergeError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CodeMergeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CodeMergeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CodeMergeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

// ---------------------------------------------------------------------------
// Environment overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides on top of a loaded config.
///
/// Variable names match the service's historical deployment contract:
/// `PORT`, `MAX_FILE_SIZE`, `MAX_TOTAL_SIZE` (bytes), `FILE_TTL` and
/// `CLEANUP_INTERVAL` (seconds). Unset variables leave the config
/// untouched; unparseable values are a config error.
pub fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    if let Some(port) = env_parsed::<u16>("PORT")? {
        config.server.port = port;
    }
    if let Some(max_file) = env_parsed::<usize>("MAX_FILE_SIZE")? {
        config.limits.max_file_size_bytes = max_file;
    }
    if let Some(max_total) = env_parsed::<usize>("MAX_TOTAL_SIZE")? {
        config.limits.max_total_size_bytes = max_total;
    }
    if let Some(ttl) = env_parsed::<u64>("FILE_TTL")? {
        config.retention.file_ttl_secs = ttl;
    }
    if let Some(interval) = env_parsed::<u64>("CLEANUP_INTERVAL")? {
        config.retention.sweep_interval_secs = interval;
    }
    Ok(())
}

/// Read and parse an env var, treating unset or empty as `None`.
fn env_parsed<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse::<T>().map(Some).map_err(|_| {
            CodeMergeError::config(format!("invalid value for {name}: {val:?}"))
        }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("max_file_size_bytes"));
        assert!(toml_str.contains("file_ttl_secs"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.limits.max_file_size_bytes, 10 * 1024 * 1024);
        assert_eq!(parsed.limits.max_total_size_bytes, 50 * 1024 * 1024);
        assert_eq!(parsed.retention.file_ttl_secs, 600);
        assert_eq!(parsed.retention.sweep_interval_secs, 300);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[server]
port = 9090

[retention]
file_ttl_secs = 60
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.retention.file_ttl_secs, 60);
        assert_eq!(config.retention.sweep_interval_secs, 300);
        assert_eq!(config.limits.max_total_size_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn retention_durations() {
        let retention = RetentionConfig::default();
        assert_eq!(retention.file_ttl(), Duration::from_secs(600));
        assert_eq!(retention.sweep_interval(), Duration::from_secs(300));
    }

    #[test]
    fn env_override_rejects_garbage() {
        // No other test in this crate touches the environment.
        unsafe { std::env::set_var("PORT", "not-a-port") };
        let mut config = AppConfig::default();
        let result = apply_env_overrides(&mut config);
        unsafe { std::env::remove_var("PORT") };
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("PORT"));
    }
}

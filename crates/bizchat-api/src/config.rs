//! Configuration file loading.
//!
//! Reads `AppConfig` from the path in `BIZCHAT_CONFIG`, falling back to
//! `~/.bizchat/config.toml`. A missing file yields the defaults, so the
//! service runs out of the box; a file that exists but does not parse is
//! an error rather than a silent fallback.

use std::path::PathBuf;

use bizchat_types::config::AppConfig;

/// Resolve the configuration file path.
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("BIZCHAT_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bizchat")
        .join("config.toml")
}

/// Load the application configuration.
pub fn load() -> anyhow::Result<AppConfig> {
    let path = config_path();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }

    let raw = std::fs::read_to_string(&path)?;
    let config: AppConfig = toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid config at {}: {e}", path.display()))?;
    Ok(config)
}

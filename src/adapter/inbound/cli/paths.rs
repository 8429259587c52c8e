//! Path utilities for freegames.
//!
//! The default configuration lives under `~/.freegames/config.toml`.

use std::path::PathBuf;

/// Returns the freegames home directory (`~/.freegames/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".freegames")
}

/// Returns the default config file path (`~/.freegames/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

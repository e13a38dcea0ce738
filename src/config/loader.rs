// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DevserveError, Result};

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| DevserveError::Config(format!("reading config file at {path:?}: {e}")))?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - at least one `[service.<name>]` section,
///   - non-empty commands with a non-empty program,
///   - sane `kill_name` overrides.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw = load_from_path(&path)?;
    ConfigFile::try_from(raw)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `Devserve.toml` in the current working
/// directory; the function exists so a `DEVSERVE_CONFIG` env var or
/// multi-location discovery can be added later without touching callers.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Devserve.toml")
}

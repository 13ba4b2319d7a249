//! Config path resolution
//!
//! Handles resolving paths for configuration files based on the plugin's location.

use std::path::PathBuf;

use super::{ConfigError, ConfigResult};

/// Directory name used under `config/`
pub const CONFIG_DIR_NAME: &str = "griefprevention";

/// Main config file name
pub const CONFIG_FILE_NAME: &str = "griefprevention.toml";

/// Returns the server base directory by navigating up from the plugin binary.
///
/// The plugin is loaded from:
/// `<server>/mods/griefprevention.so`
///
/// This navigates up 2 levels to reach `<server>/`.
pub fn server_base_dir() -> ConfigResult<PathBuf> {
    let exe = std::env::current_exe().map_err(ConfigError::IoError)?;

    // Navigate: griefprevention.so -> mods -> server
    exe.parent() // mods/
        .and_then(|p| p.parent()) // server/
        .map(PathBuf::from)
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Returns the plugin config directory.
///
/// Path: `<server>/config/griefprevention/`
pub fn config_dir() -> ConfigResult<PathBuf> {
    Ok(config_dir_in(&server_base_dir()?))
}

/// Returns the main config file path.
///
/// Path: `<server>/config/griefprevention/griefprevention.toml`
pub fn config_path() -> ConfigResult<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Returns the path of a data file kept beside the config.
pub fn data_file_path(file_name: &str) -> ConfigResult<PathBuf> {
    Ok(config_dir()?.join(file_name))
}

pub(crate) fn config_dir_in(base: &std::path::Path) -> PathBuf {
    base.join("config").join(CONFIG_DIR_NAME)
}

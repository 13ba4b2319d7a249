//! Configuration for GriefPrevention
//!
//! Loaded from a TOML file that is auto-generated with defaults when missing:
//!
//! ```toml
//! version = 1
//! debug = false
//!
//! [flags]
//! user_editable = ["block-break", "block-place", "interact-block-secondary"]
//!
//! [flags.defaults.basic]
//! entity-damage = true
//!
//! [bans]
//! file = "bans.toml"
//! ```

mod loader;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::flags::{ClaimFlag, DefaultsTable};

pub use loader::{config_dir, config_path, data_file_path, server_base_dir, CONFIG_FILE_NAME};

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Could not determine config directory from plugin location
    #[error("Config directory not available - could not resolve plugin base path")]
    NoConfigDirectory,
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level plugin configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GriefPreventionConfig {
    /// Config version for future migration support
    pub version: u32,

    /// Enable debug logging
    pub debug: bool,

    pub flags: FlagConfig,

    pub bans: BanConfig,
}

/// `[flags]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagConfig {
    /// Base flag names players without admin capability may edit
    pub user_editable: Vec<String>,

    /// Per claim type default overrides: `claim type -> flag -> value`
    pub defaults: BTreeMap<String, BTreeMap<String, bool>>,
}

/// `[bans]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BanConfig {
    /// Ban reason file, relative to the config directory
    pub file: String,
}

impl Default for GriefPreventionConfig {
    fn default() -> Self {
        Self {
            version: 1,
            debug: false,
            flags: FlagConfig::default(),
            bans: BanConfig::default(),
        }
    }
}

impl Default for FlagConfig {
    fn default() -> Self {
        let user_editable = [
            ClaimFlag::BlockBreak,
            ClaimFlag::BlockPlace,
            ClaimFlag::EntityDamage,
            ClaimFlag::InteractBlockSecondary,
            ClaimFlag::InteractEntitySecondary,
            ClaimFlag::InteractInventory,
            ClaimFlag::ItemDrop,
            ClaimFlag::ItemPickup,
            ClaimFlag::PortalUse,
        ]
        .into_iter()
        .map(|flag| flag.name().to_string())
        .collect();

        Self {
            user_editable,
            defaults: BTreeMap::new(),
        }
    }
}

impl Default for BanConfig {
    fn default() -> Self {
        Self {
            file: "bans.toml".to_string(),
        }
    }
}

impl GriefPreventionConfig {
    /// Load config from file, creating default if missing.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&config_path()?)
    }

    /// Save config to file.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&config_path()?)
    }

    /// Reload config from file.
    pub fn reload(&mut self) -> ConfigResult<()> {
        let path = config_path()?;
        let content = std::fs::read_to_string(&path)?;
        *self = toml::from_str(&content)?;
        tracing::debug!("Reloaded config from {:?}", path);
        Ok(())
    }

    /// Load config from an explicit path, creating default if missing.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::debug!("Loaded config from {:?}", path);
            Ok(config)
        } else {
            let default = Self::default();
            default.save_to(path)?;
            tracing::info!("Created default config at {:?}", path);
            Ok(default)
        }
    }

    /// Save config to an explicit path.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// User-editable flags that are known, ignoring unknown names
    pub fn user_editable_flags(&self) -> BTreeSet<ClaimFlag> {
        self.flags
            .user_editable
            .iter()
            .filter_map(|name| ClaimFlag::from_name(name))
            .collect()
    }

    /// Compiled-in defaults with the configured overrides applied
    pub fn defaults_table(&self) -> DefaultsTable {
        let mut table = DefaultsTable::builtin();
        table.apply_overrides(&self.flags.defaults);
        table
    }

    /// Configured flag and claim type names that are not recognised
    pub fn unknown_flags(&self) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .flags
            .user_editable
            .iter()
            .filter(|name| ClaimFlag::from_name(name).is_none())
            .cloned()
            .collect();
        unknown.extend(DefaultsTable::empty().apply_overrides(&self.flags.defaults));
        unknown
    }

    /// Log every unknown name; they are otherwise ignored
    pub fn warn_unknown_flags(&self) {
        for name in self.unknown_flags() {
            tracing::warn!("Ignoring unknown flag '{}' in config", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use griefprevention_api::ClaimType;

    use super::*;

    #[test]
    fn test_load_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("griefprevention").join(CONFIG_FILE_NAME);

        let config = GriefPreventionConfig::load_from(&path).unwrap();
        assert_eq!(config, GriefPreventionConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = GriefPreventionConfig::default();
        config.debug = true;
        config.flags.user_editable = vec!["portal-use".into()];
        config.save_to(&path).unwrap();

        let loaded = GriefPreventionConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let contents = "debug = true\n\n[flags.defaults.basic]\nblock-break = true\n";
        std::fs::write(&path, contents).unwrap();

        let config = GriefPreventionConfig::load_from(&path).unwrap();
        assert!(config.debug);
        assert_eq!(config.bans.file, "bans.toml");
        assert!(config.user_editable_flags().contains(&ClaimFlag::BlockBreak));
        assert_eq!(
            config.defaults_table().get(ClaimType::Basic, ClaimFlag::BlockBreak),
            Some(true)
        );
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "debug = [").unwrap();

        assert!(matches!(
            GriefPreventionConfig::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_unknown_flags() {
        let mut config = GriefPreventionConfig::default();
        config.flags.user_editable.push("fly".into());
        config
            .flags
            .defaults
            .entry("castle".into())
            .or_default()
            .insert("block-break".into(), true);
        config
            .flags
            .defaults
            .entry("town".into())
            .or_default()
            .insert("teleport".into(), false);

        let unknown = config.unknown_flags();
        assert!(unknown.contains(&"fly".to_string()));
        assert!(unknown.contains(&"castle".to_string()));
        assert!(unknown.contains(&"town.teleport".to_string()));
        assert!(!config.user_editable_flags().is_empty());
    }
}

//! Ban reason registry
//!
//! Free-text reasons attached to global bans (wilderness overrides), kept per
//! world and keyed by the flag key without its `griefprevention.flags.`
//! prefix. Purely informational; ban values themselves live in the
//! permission store.
//!
//! ```toml
//! [world]
//! portal-use = "exploit prevention"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::{data_file_path, ConfigResult, GriefPreventionConfig};

type WorldReasons = BTreeMap<String, BTreeMap<String, String>>;

/// Per-world ban reasons, optionally backed by a TOML file
#[derive(Debug, Default)]
pub struct BanReasons {
    reasons: RwLock<WorldReasons>,
    /// Written through on every change when set
    path: Option<PathBuf>,
}

impl BanReasons {
    /// An in-memory registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load reasons from a file; a missing file starts empty.
    ///
    /// Every later change is written back to the same file.
    pub fn load(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        let reasons = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            WorldReasons::new()
        };
        debug!("Loaded ban reasons from {:?}", path);

        Ok(Self {
            reasons: RwLock::new(reasons),
            path: Some(path),
        })
    }

    /// Load the ban file named in the config, beside the config file
    pub fn from_config(config: &GriefPreventionConfig) -> ConfigResult<Self> {
        Self::load(data_file_path(&config.bans.file)?)
    }

    /// File this registry writes through to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record or replace the reason for a ban
    pub fn record(&self, world: &str, key: &str, reason: &str) {
        self.reasons
            .write()
            .entry(world.to_string())
            .or_default()
            .insert(key.to_string(), reason.to_string());
        self.persist();
    }

    /// Remove the reason for a ban, returning it
    pub fn remove(&self, world: &str, key: &str) -> Option<String> {
        let removed = {
            let mut reasons = self.reasons.write();
            let world_reasons = reasons.get_mut(world)?;
            let removed = world_reasons.remove(key);
            if world_reasons.is_empty() {
                reasons.remove(world);
            }
            removed
        };
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    pub fn get(&self, world: &str, key: &str) -> Option<String> {
        self.reasons.read().get(world)?.get(key).cloned()
    }

    /// All reasons recorded for a world
    pub fn entries(&self, world: &str) -> BTreeMap<String, String> {
        self.reasons.read().get(world).cloned().unwrap_or_default()
    }

    /// Write all reasons to the backing file, if any
    pub fn save(&self) -> ConfigResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&*self.reasons.read())?;
        std::fs::write(path, content)?;
        debug!("Saved ban reasons to {:?}", path);
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!("Failed to save ban reasons: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_remove() {
        let bans = BanReasons::new();
        bans.record("world", "portal-use", "exploit prevention");

        assert_eq!(bans.get("world", "portal-use").as_deref(), Some("exploit prevention"));
        assert_eq!(bans.get("world_nether", "portal-use"), None);

        assert_eq!(bans.remove("world", "portal-use").as_deref(), Some("exploit prevention"));
        assert!(bans.entries("world").is_empty());
        assert_eq!(bans.remove("world", "portal-use"), None);
    }

    #[test]
    fn test_write_through_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bans.toml");

        let bans = BanReasons::load(&path).unwrap();
        bans.record("world", "item-use.minecraft.ender_pearl", "pearl glitching");
        bans.record("world_nether", "portal-use", "exploit prevention");
        assert!(path.exists());

        let reloaded = BanReasons::load(&path).unwrap();
        assert_eq!(
            reloaded.get("world", "item-use.minecraft.ender_pearl").as_deref(),
            Some("pearl glitching")
        );
        assert_eq!(reloaded.entries("world_nether").len(), 1);
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let bans = BanReasons::new();
        bans.record("world", "portal-use", "x");
        assert!(bans.save().is_ok());
        assert!(bans.path().is_none());
    }
}

//! Game registry lookups used for flag target validation
//!
//! Identifiers are passed in their full `namespace:id` form.

use std::collections::{HashMap, HashSet};

/// Read-only view of the host's game registries
pub trait GameRegistry: Send + Sync {
    /// Whether a block type exists (e.g. `minecraft:dirt`)
    fn has_block(&self, id: &str) -> bool;

    /// Whether a block type has a state with the given metadata value
    fn has_block_state(&self, id: &str, meta: u32) -> bool;

    /// Whether an item type exists
    fn has_item(&self, id: &str) -> bool;

    /// Whether an entity type exists
    fn has_entity(&self, id: &str) -> bool;

    /// Whether a command is registered by the given plugin
    fn has_command(&self, plugin: &str, command: &str) -> bool;
}

/// Fixed, in-memory registry
///
/// Useful for embedding the engine outside a running server and for tests.
///
/// # Example
///
/// ```
/// use griefprevention_host::{GameRegistry, StaticRegistry};
///
/// let registry = StaticRegistry::new()
///     .with_blocks(["minecraft:dirt"])
///     .with_block_states("minecraft:wool", [0, 1, 14])
///     .with_command("minecraft", "give");
///
/// assert!(registry.has_block("minecraft:dirt"));
/// assert!(registry.has_block_state("minecraft:wool", 14));
/// assert!(registry.has_command("minecraft", "give"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    blocks: HashSet<String>,
    block_states: HashMap<String, HashSet<u32>>,
    items: HashSet<String>,
    entities: HashSet<String>,
    commands: HashSet<(String, String)>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocks<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Register a block along with its valid metadata values
    pub fn with_block_states<I>(mut self, id: &str, metas: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        self.blocks.insert(id.to_string());
        self.block_states
            .entry(id.to_string())
            .or_default()
            .extend(metas);
        self
    }

    pub fn with_items<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_entities<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_command(mut self, plugin: &str, command: &str) -> Self {
        self.commands
            .insert((plugin.to_lowercase(), command.to_lowercase()));
        self
    }
}

impl GameRegistry for StaticRegistry {
    fn has_block(&self, id: &str) -> bool {
        self.blocks.contains(id)
    }

    fn has_block_state(&self, id: &str, meta: u32) -> bool {
        self.block_states
            .get(id)
            .is_some_and(|states| states.contains(&meta))
    }

    fn has_item(&self, id: &str) -> bool {
        self.items.contains(id)
    }

    fn has_entity(&self, id: &str) -> bool {
        self.entities.contains(id)
    }

    fn has_command(&self, plugin: &str, command: &str) -> bool {
        self.commands
            .contains(&(plugin.to_lowercase(), command.to_lowercase()))
    }
}

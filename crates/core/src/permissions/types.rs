//! Caller permission types
//!
//! This module defines a permission node set with hierarchical wildcard
//! matching, and a ready-made [`Caller`] built on it.

use std::collections::HashSet;

use griefprevention_host::Caller;
use uuid::Uuid;

/// Node granting every permission
pub const ROOT_NODE: &str = "*";

/// Set of permission nodes held by a caller
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    /// Permission nodes (e.g., "griefprevention.admin.claims")
    pub nodes: HashSet<String>,
}

impl PermissionSet {
    /// Create an empty permission set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add nodes to this set
    pub fn add(&mut self, nodes: &[&str]) {
        for node in nodes {
            self.nodes.insert((*node).to_string());
        }
    }

    /// Remove nodes from this set
    pub fn remove(&mut self, nodes: &[&str]) {
        for node in nodes {
            self.nodes.remove(*node);
        }
    }

    /// Check if the set grants a node
    ///
    /// Also checks wildcards: `a.b.*` grants `a.b.c` and everything below it,
    /// and `*` grants everything.
    pub fn has(&self, node: &str) -> bool {
        // Direct match
        if self.nodes.contains(node) || self.nodes.contains(ROOT_NODE) {
            return true;
        }

        // Check each parent wildcard
        let mut parent = node;
        while let Some((head, _)) = parent.rsplit_once('.') {
            if self.nodes.contains(&format!("{}.*", head)) {
                return true;
            }
            parent = head;
        }

        false
    }

    /// Check if the set grants any of the given nodes
    pub fn has_any(&self, nodes: &[&str]) -> bool {
        nodes.iter().any(|n| self.has(n))
    }

    /// Check if the set grants all of the given nodes
    pub fn has_all(&self, nodes: &[&str]) -> bool {
        nodes.iter().all(|n| self.has(n))
    }

    /// Check if empty (no nodes)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

/// A caller with a fixed name, optional player id and permission set
///
/// Serves as the console caller, and as a player caller when the host has
/// already resolved the player's nodes.
#[derive(Debug, Clone)]
pub struct StaticCaller {
    name: String,
    player_id: Option<Uuid>,
    permissions: PermissionSet,
}

impl StaticCaller {
    /// The server console: not a player, holds every node
    pub fn console() -> Self {
        Self {
            name: "Console".to_string(),
            player_id: None,
            permissions: [ROOT_NODE].into_iter().collect(),
        }
    }

    pub fn player(name: impl Into<String>, id: Uuid, permissions: PermissionSet) -> Self {
        Self {
            name: name.into(),
            player_id: Some(id),
            permissions,
        }
    }
}

impl Caller for StaticCaller {
    fn name(&self) -> &str {
        &self.name
    }

    fn player_id(&self) -> Option<Uuid> {
        self.player_id
    }

    fn has_permission(&self, node: &str) -> bool {
        self.permissions.has(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_set_basic() {
        let mut set = PermissionSet::new();
        assert!(set.is_empty());

        set.add(&["griefprevention.admin.claims", "griefprevention.user-claim-flags.block-break"]);
        assert!(set.has("griefprevention.admin.claims"));
        assert!(set.has("griefprevention.user-claim-flags.block-break"));
        assert!(!set.has("griefprevention.user-claim-flags.block-place"));

        set.remove(&["griefprevention.admin.claims"]);
        assert!(!set.has("griefprevention.admin.claims"));
    }

    #[test]
    fn test_wildcard_nodes() {
        let set: PermissionSet = ["griefprevention.user-claim-flags.*"].into_iter().collect();

        assert!(set.has("griefprevention.user-claim-flags.block-break"));
        assert!(set.has("griefprevention.user-claim-flags.item-use"));
        assert!(!set.has("griefprevention.admin-claim-flags.block-break"));
        // the wildcard node is not the parent itself
        assert!(!set.has("griefprevention.user-claim-flags"));
    }

    #[test]
    fn test_root_node() {
        let set: PermissionSet = [ROOT_NODE].into_iter().collect();
        assert!(set.has("anything.at.all"));
    }

    #[test]
    fn test_has_any_all() {
        let set: PermissionSet = ["a.b", "a.c"].into_iter().collect();
        assert!(set.has_any(&["a.b", "a.d"]));
        assert!(!set.has_any(&["a.d", "a.e"]));
        assert!(set.has_all(&["a.b", "a.c"]));
        assert!(!set.has_all(&["a.b", "a.d"]));
    }

    #[test]
    fn test_static_callers() {
        let console = StaticCaller::console();
        assert!(!console.is_player());
        assert!(console.has_permission("griefprevention.admin.flag-overrides"));

        let id = Uuid::new_v4();
        let player = StaticCaller::player("Steve", id, PermissionSet::new());
        assert_eq!(player.player_id(), Some(id));
        assert!(!player.has_permission("griefprevention.admin.claims"));
    }
}

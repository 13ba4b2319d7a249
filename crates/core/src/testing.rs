//! Test doubles for host collaborators

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use griefprevention_api::{ClaimId, ClaimType, ContextSet, Subject, Tristate};
use griefprevention_host::{Caller, Claim, DataLayer, PermissionStore, StaticRegistry};
use uuid::Uuid;

use crate::permissions::{MemoryPermissionStore, PermissionSet, StaticCaller};

pub(crate) const WORLD: &str = "world";

/// Claim with a fixed parent chain and edit policy
pub(crate) struct MockClaim {
    id: ClaimId,
    claim_type: ClaimType,
    world: String,
    /// Closest first
    parents: Vec<Arc<dyn Claim>>,
    deny_reason: Option<String>,
}

impl MockClaim {
    pub fn new(claim_type: ClaimType) -> Arc<Self> {
        Arc::new(Self {
            id: ClaimId::new_v4(),
            claim_type,
            world: WORLD.to_string(),
            parents: Vec::new(),
            deny_reason: None,
        })
    }

    /// A claim inheriting from `parent` and everything `parent` inherits
    pub fn child_of(claim_type: ClaimType, parent: &Arc<MockClaim>) -> Arc<Self> {
        let mut parents: Vec<Arc<dyn Claim>> = vec![parent.clone() as Arc<dyn Claim>];
        parents.extend(parent.parents.iter().cloned());
        Arc::new(Self {
            id: ClaimId::new_v4(),
            claim_type,
            world: WORLD.to_string(),
            parents,
            deny_reason: None,
        })
    }

    /// A claim refusing edits from every player
    pub fn denying(claim_type: ClaimType, reason: &str) -> Arc<Self> {
        Arc::new(Self {
            id: ClaimId::new_v4(),
            claim_type,
            world: WORLD.to_string(),
            parents: Vec::new(),
            deny_reason: Some(reason.to_string()),
        })
    }
}

impl Claim for MockClaim {
    fn id(&self) -> ClaimId {
        self.id
    }

    fn claim_type(&self) -> ClaimType {
        self.claim_type
    }

    fn world(&self) -> &str {
        &self.world
    }

    fn inherited_parents(&self) -> Vec<Arc<dyn Claim>> {
        self.parents.clone()
    }

    fn allow_edit(&self, caller: &dyn Caller) -> Option<String> {
        if caller.is_player() {
            self.deny_reason.clone()
        } else {
            None
        }
    }
}

/// Memory store that counts writes and can be told to reject them
#[derive(Default)]
pub(crate) struct RecordingStore {
    inner: MemoryPermissionStore,
    writes: AtomicUsize,
    reject: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn reject_writes(&self) {
        self.reject.store(true, Ordering::SeqCst);
    }

    /// Value stored for one key, ignoring the write counter
    pub fn value(
        &self,
        subject: &Subject,
        contexts: &ContextSet,
        key: &str,
        layer: DataLayer,
    ) -> Option<bool> {
        self.inner.get_permissions(subject, contexts, layer).get(key).copied()
    }

    /// Write without counting, for test setup
    pub fn seed(
        &self,
        subject: &Subject,
        contexts: &ContextSet,
        key: &str,
        value: bool,
        layer: DataLayer,
    ) {
        self.inner
            .set_permission(subject, contexts, key, Tristate::from_bool(value), layer);
    }
}

impl PermissionStore for RecordingStore {
    fn get_permissions(
        &self,
        subject: &Subject,
        contexts: &ContextSet,
        layer: DataLayer,
    ) -> HashMap<String, bool> {
        self.inner.get_permissions(subject, contexts, layer)
    }

    fn set_permission(
        &self,
        subject: &Subject,
        contexts: &ContextSet,
        key: &str,
        value: Tristate,
        layer: DataLayer,
    ) -> bool {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.reject.load(Ordering::SeqCst) {
            return false;
        }
        self.inner.set_permission(subject, contexts, key, value, layer)
    }

    fn clear_permissions(&self, contexts: &ContextSet) -> usize {
        self.inner.clear_permissions(contexts)
    }

    fn clear_subject_permissions(
        &self,
        subject: &Subject,
        contexts: &ContextSet,
        layer: DataLayer,
    ) -> usize {
        self.inner.clear_subject_permissions(subject, contexts, layer)
    }
}

/// Registry knowing a handful of vanilla identifiers
pub(crate) fn registry() -> StaticRegistry {
    StaticRegistry::new()
        .with_blocks(["minecraft:dirt", "minecraft:stone", "minecraft:dirt_path"])
        .with_block_states("minecraft:wool", [0, 14])
        .with_items(["minecraft:diamond_pickaxe", "minecraft:ender_pearl"])
        .with_entities(["minecraft:zombie", "minecraft:creeper", "minecraft:player"])
        .with_command("minecraft", "tp")
        .with_command("essentials", "home")
}

/// Player holding exactly the given nodes
pub(crate) fn player(nodes: &[&str]) -> StaticCaller {
    StaticCaller::player("Steve", Uuid::new_v4(), nodes.iter().copied().collect::<PermissionSet>())
}

/// Console caller holding every node
pub(crate) fn console() -> StaticCaller {
    StaticCaller::console()
}

//! Flag resolution
//!
//! Reads the four permission layers of a claim for one subject and merges
//! them into effective values.
//!
//! Precedence, highest first:
//!
//! ```text
//! OVERRIDE          most specific covering key (type override, global ban list)
//! CLAIM | INHERIT   claim's own value, else closest ancestor's
//! DEFAULT           persisted (admin-set)
//! DEFAULT           transient (built-in)
//! ```

use std::collections::{BTreeMap, BTreeSet};

use griefprevention_api::{ClaimId, Context, ContextSet, FlagType, Subject, Tristate};
use griefprevention_host::{Claim, DataLayer, PermissionStore};
use tracing::trace;

use crate::context::{ban_context, default_contexts_for, layer_reads, override_contexts_for};
use crate::flags::FlagKey;

/// A claim-layer value and the ancestor that supplied it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClaimValue {
    value: bool,
    /// `None` when set on the claim itself
    provenance: Option<ClaimId>,
}

/// Effective value of one flag key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedEntry {
    pub value: Tristate,
    /// Layer the value came from, `None` when undefined everywhere
    pub layer: Option<FlagType>,
    /// Ancestor claim supplying an inherited value
    pub provenance: Option<ClaimId>,
}

impl ResolvedEntry {
    fn new(value: bool, layer: FlagType, provenance: Option<ClaimId>) -> Self {
        Self {
            value: Tristate::from_bool(value),
            layer: Some(layer),
            provenance,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.value.is_defined()
    }
}

/// Per-request snapshot of the permission layers of one claim
#[derive(Debug, Clone, Default)]
pub struct FlagLayers {
    default_transient: BTreeMap<FlagKey, bool>,
    default_persisted: BTreeMap<FlagKey, bool>,
    claim: BTreeMap<FlagKey, ClaimValue>,
    overrides: BTreeMap<FlagKey, bool>,
}

impl FlagLayers {
    /// Read all layers of `claim` for `subject` from the store.
    ///
    /// Keys that do not parse as flag keys are skipped.
    pub fn load(store: &dyn PermissionStore, subject: &Subject, claim: &dyn Claim) -> Self {
        let mut layers = Self::default();

        for contexts in layer_reads(&default_contexts_for(claim)) {
            read_into(
                store,
                subject,
                &contexts,
                DataLayer::Transient,
                &mut layers.default_transient,
            );
            read_into(
                store,
                subject,
                &contexts,
                DataLayer::Persisted,
                &mut layers.default_persisted,
            );
        }

        // Root-most ancestor first so closer claims overwrite
        for parent in claim.inherited_parents().iter().rev() {
            layers.read_claim(store, subject, parent.context(), Some(parent.id()));
        }
        layers.read_claim(store, subject, claim.context(), None);

        let ban_contexts = ContextSet::from([ban_context(), Context::world(claim.world())]);
        for contexts in layer_reads(&ban_contexts)
            .into_iter()
            .chain(layer_reads(&override_contexts_for(claim)))
        {
            read_into(store, subject, &contexts, DataLayer::Persisted, &mut layers.overrides);
        }

        layers
    }

    fn read_claim(
        &mut self,
        store: &dyn PermissionStore,
        subject: &Subject,
        context: Context,
        provenance: Option<ClaimId>,
    ) {
        let mut values = BTreeMap::new();
        read_into(store, subject, &context.into_set(), DataLayer::Persisted, &mut values);
        for (key, value) in values {
            self.claim.insert(key, ClaimValue { value, provenance });
        }
    }

    /// Effective value of exactly `key`
    pub fn compute_effective(&self, key: &FlagKey) -> ResolvedEntry {
        let covering = self
            .overrides
            .iter()
            .filter(|(candidate, _)| candidate.covers(key))
            .max_by_key(|(candidate, _)| candidate.specificity());
        if let Some((_, value)) = covering {
            return ResolvedEntry::new(*value, FlagType::Override, None);
        }

        if let Some(claim_value) = self.claim.get(key) {
            let layer = match claim_value.provenance {
                Some(_) => FlagType::Inherit,
                None => FlagType::Claim,
            };
            return ResolvedEntry::new(claim_value.value, layer, claim_value.provenance);
        }

        if let Some(value) = self.default_persisted.get(key) {
            return ResolvedEntry::new(*value, FlagType::Default, None);
        }
        if let Some(value) = self.default_transient.get(key) {
            return ResolvedEntry::new(*value, FlagType::Default, None);
        }

        ResolvedEntry::default()
    }

    /// Effective value of `key`, falling back through its ancestors until
    /// some layer defines one
    pub fn resolve(&self, key: &FlagKey) -> ResolvedEntry {
        std::iter::once(key.clone())
            .chain(key.ancestors())
            .map(|candidate| self.compute_effective(&candidate))
            .find(ResolvedEntry::is_defined)
            .unwrap_or_default()
    }

    /// Merged view of every stored key.
    ///
    /// `All`, `Group` and `Player` list everything; a layer type lists only
    /// keys whose effective value comes from that layer.
    pub fn list_by_type(&self, flag_type: FlagType) -> BTreeMap<FlagKey, ResolvedEntry> {
        self.keys()
            .into_iter()
            .map(|key| {
                let entry = self.compute_effective(&key);
                (key, entry)
            })
            .filter(|(_, entry)| match flag_type {
                FlagType::All | FlagType::Group | FlagType::Player => true,
                layer => entry.layer == Some(layer),
            })
            .collect()
    }

    fn keys(&self) -> BTreeSet<FlagKey> {
        self.default_transient
            .keys()
            .chain(self.default_persisted.keys())
            .chain(self.claim.keys())
            .chain(self.overrides.keys())
            .cloned()
            .collect()
    }
}

fn read_into(
    store: &dyn PermissionStore,
    subject: &Subject,
    contexts: &ContextSet,
    layer: DataLayer,
    out: &mut BTreeMap<FlagKey, bool>,
) {
    for (permission, value) in store.get_permissions(subject, contexts, layer) {
        match FlagKey::parse(&permission) {
            Ok(key) => {
                out.insert(key, value);
            }
            Err(e) => trace!("Skipping stored permission '{}': {}", permission, e),
        }
    }
}

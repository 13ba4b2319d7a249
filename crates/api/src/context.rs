//! Permission scoping contexts
//!
//! A context is a `(key, value)` tag. The permission store partitions stored
//! values by the set of contexts they were written under.

use std::collections::BTreeSet;
use std::fmt;

use crate::{ClaimId, ClaimType};

/// Well-known context keys
pub mod context_keys {
    /// Scopes a value to a single claim (value: claim UUID)
    pub const CLAIM: &str = "gp_claim";
    /// Scopes a value to a world (value: world name)
    pub const WORLD: &str = "world";
    /// Per-claim-type DEFAULT layer (value: claim type name)
    pub const CLAIM_DEFAULT: &str = "gp_claim_defaults";
    /// Per-claim-type OVERRIDE layer (value: claim type name)
    pub const CLAIM_OVERRIDE: &str = "gp_claim_overrides";
}

/// A single `(key, value)` scoping tag
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Context {
    key: String,
    value: String,
}

/// A set of contexts; ordered so it can be used as a map key
pub type ContextSet = BTreeSet<Context>;

impl Context {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Context scoping a value to one claim
    pub fn claim(id: ClaimId) -> Self {
        Self::new(context_keys::CLAIM, id.to_string())
    }

    /// Context scoping a value to one world
    pub fn world(name: &str) -> Self {
        Self::new(context_keys::WORLD, name)
    }

    /// DEFAULT layer context for a claim type
    pub fn claim_default(claim_type: ClaimType) -> Self {
        Self::new(context_keys::CLAIM_DEFAULT, claim_type.name())
    }

    /// OVERRIDE layer context for a claim type
    pub fn claim_override(claim_type: ClaimType) -> Self {
        Self::new(context_keys::CLAIM_OVERRIDE, claim_type.name())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Build a set holding only this context
    pub fn into_set(self) -> ContextSet {
        BTreeSet::from([self])
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_contexts_are_distinct() {
        let default = Context::claim_default(ClaimType::Basic);
        let override_ctx = Context::claim_override(ClaimType::Basic);
        assert_ne!(default, override_ctx);
        assert_ne!(default, Context::claim_default(ClaimType::Admin));
        assert_eq!(default.to_string(), "gp_claim_defaults=basic");
    }

    #[test]
    fn test_context_set_ordering_is_stable() {
        let a: ContextSet = [Context::world("nether"), Context::claim_default(ClaimType::Town)]
            .into_iter()
            .collect();
        let b: ContextSet = [Context::claim_default(ClaimType::Town), Context::world("nether")]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }
}

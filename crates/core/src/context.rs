//! Context model
//!
//! Maps claims and user-entered scope names to the contexts flag values are
//! stored under.
//!
//! | scope | context |
//! |---|---|
//! | claim (none given) | `gp_claim=<claim uuid>` |
//! | `default` | `gp_claim_defaults=<claim type>` |
//! | `override` | `gp_claim_overrides=<claim type>` |
//! | `ban` | `gp_claim_overrides=wilderness` (global ban list) |

use griefprevention_api::{context_keys, ClaimType, Context, ContextSet};
use griefprevention_host::Claim;

use crate::error::FlagError;

/// Which layer a context scopes values to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// DEFAULT layer of a claim type
    Default(ClaimType),
    /// OVERRIDE layer of a claim type
    Override(ClaimType),
}

impl ContextKind {
    /// Classify a context; `None` for claim, world and foreign contexts
    pub fn of(context: &Context) -> Option<Self> {
        let claim_type = context.value().parse::<ClaimType>().ok()?;
        match context.key() {
            context_keys::CLAIM_DEFAULT => Some(Self::Default(claim_type)),
            context_keys::CLAIM_OVERRIDE => Some(Self::Override(claim_type)),
            _ => None,
        }
    }
}

/// The global ban list context
pub fn ban_context() -> Context {
    Context::claim_override(ClaimType::Wilderness)
}

/// Map a scope name to the context it selects for a claim
pub fn resolve_context(claim: &dyn Claim, scope: &str) -> Result<Context, FlagError> {
    match scope.to_ascii_lowercase().as_str() {
        "default" | "defaults" => Ok(Context::claim_default(claim.claim_type())),
        "override" | "overrides" | "force" | "forced" => {
            Ok(Context::claim_override(claim.claim_type()))
        }
        "ban" => Ok(ban_context()),
        _ => Err(FlagError::InvalidContext(scope.to_string())),
    }
}

/// DEFAULT layer contexts of a claim: its type default plus its world
pub fn default_contexts_for(claim: &dyn Claim) -> ContextSet {
    ContextSet::from([
        Context::claim_default(claim.claim_type()),
        Context::world(claim.world()),
    ])
}

/// OVERRIDE layer contexts of a claim: its type override plus its world.
///
/// Empty for wilderness, whose override context is the global ban list and
/// is read separately for every claim.
pub fn override_contexts_for(claim: &dyn Claim) -> ContextSet {
    if claim.is_wilderness() {
        return ContextSet::new();
    }
    ContextSet::from([
        Context::claim_override(claim.claim_type()),
        Context::world(claim.world()),
    ])
}

/// Context sets a layer is read under: bare scope, then world-scoped.
///
/// Later entries win when merged.
pub(crate) fn layer_reads(scoped: &ContextSet) -> Vec<ContextSet> {
    let bare: ContextSet = scoped
        .iter()
        .filter(|c| c.key() != context_keys::WORLD)
        .cloned()
        .collect();
    if bare.is_empty() {
        return Vec::new();
    }
    if bare.len() == scoped.len() {
        vec![bare]
    } else {
        vec![bare, scoped.clone()]
    }
}

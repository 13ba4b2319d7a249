//! Claim interface
//!
//! Claims are owned by the host's claim data store. The flag engine only
//! needs their identity, type, world, inheritance chain and edit check.

use std::sync::Arc;

use griefprevention_api::{ClaimId, ClaimType, Context};

use crate::Caller;

/// A claim as seen by the flag engine
pub trait Claim: Send + Sync {
    fn id(&self) -> ClaimId;

    fn claim_type(&self) -> ClaimType;

    /// Name of the world the claim lives in
    fn world(&self) -> &str;

    /// Ancestors this claim inherits flags from, closest parent first.
    ///
    /// Claims that do not inherit from their parent return an empty list.
    fn inherited_parents(&self) -> Vec<Arc<dyn Claim>>;

    /// Reason the caller may not edit this claim, or `None` if allowed
    fn allow_edit(&self, caller: &dyn Caller) -> Option<String>;

    /// The context scoping values to this claim alone
    fn context(&self) -> Context {
        Context::claim(self.id())
    }

    fn is_wilderness(&self) -> bool {
        self.claim_type().is_wilderness()
    }
}

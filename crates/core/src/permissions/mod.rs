//! Permission nodes and stores
//!
//! Flag mutations are gated by permission nodes held by the caller, and flag
//! values themselves live in a [`PermissionStore`](griefprevention_host::PermissionStore).
//!
//! # Authorization gates
//!
//! ```text
//! caller ──► claim edit check ──► flag gate ──► scope gate ──► store write
//!            (players only)       admin OR user  defaults / overrides
//! ```
//!
//! The flag gate is chosen by whether the caller holds [`nodes::ADMIN_CLAIMS`]:
//! - admins need `griefprevention.admin-claim-flags.<flag>`
//! - everyone else needs `griefprevention.user-claim-flags.<flag>`, and the
//!   flag must be listed as user-editable in the config

mod registry;
mod types;

pub use registry::MemoryPermissionStore;
pub use types::{PermissionSet, StaticCaller, ROOT_NODE};

/// Permission nodes checked by the flag engine
pub mod nodes {
    /// Caller may manage admin claims; selects the admin flag gate
    pub const ADMIN_CLAIMS: &str = "griefprevention.admin.claims";
    /// Prefix of per-flag nodes for admins
    pub const ADMIN_CLAIM_FLAGS: &str = "griefprevention.admin-claim-flags";
    /// Prefix of per-flag nodes for users
    pub const USER_CLAIM_FLAGS: &str = "griefprevention.user-claim-flags";
    /// Caller may edit DEFAULT-class contexts
    pub const MANAGE_FLAG_DEFAULTS: &str = "griefprevention.admin.flag-defaults";
    /// Caller may edit OVERRIDE-class contexts
    pub const MANAGE_FLAG_OVERRIDES: &str = "griefprevention.admin.flag-overrides";

    /// Admin node for one flag
    pub fn admin_flag(flag: &str) -> String {
        format!("{}.{}", ADMIN_CLAIM_FLAGS, flag)
    }

    /// User node for one flag
    pub fn user_flag(flag: &str) -> String {
        format!("{}.{}", USER_CLAIM_FLAGS, flag)
    }
}

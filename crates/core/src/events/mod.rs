//! Claim flag change events
//!
//! Every flag mutation is published twice:
//!
//! ```text
//! apply ──► pre-change listeners ──► store write ──► post-change listeners
//!           (may veto)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use griefprevention_core::events::HookResult;
//!
//! service.events().on_pre_change(|event| {
//!     if event.key.flag() == ClaimFlag::PortalUse {
//!         return HookResult::Cancel;
//!     }
//!     HookResult::Continue
//! });
//! ```

mod bus;
mod types;

pub use bus::{FlagEventBus, ListenerKey};
pub use types::{FlagChangeEvent, HookResult, PostChangeCallback, PreChangeCallback};

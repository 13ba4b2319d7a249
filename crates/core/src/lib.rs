//! GriefPrevention Core - Claim Flag Resolution and Mutation
//!
//! This crate decides, for a claim, subject and flag, which value applies,
//! and commits authorized flag changes to the host permission store.
//!
//! # Layers
//!
//! Flag values live in four layers of the permission store, scoped by
//! context:
//!
//! | layer | context |
//! |---|---|
//! | DEFAULT | `gp_claim_defaults=<type>` (+ world), transient and persisted |
//! | CLAIM / INHERIT | `gp_claim=<uuid>` of the claim or an ancestor |
//! | OVERRIDE | `gp_claim_overrides=<type>` (+ world) and the global ban list |
//!
//! # Example
//!
//! ```ignore
//! use griefprevention_core::{BanReasons, FlagService, GriefPreventionConfig};
//!
//! let config = GriefPreventionConfig::load()?;
//! griefprevention_core::logging::init_logging(config.debug);
//!
//! let service = FlagService::from_host(&config)?.with_bans(BanReasons::from_config(&config)?);
//! service.seed_default_permissions();
//!
//! let request = service
//!     .request(&*claim, "block-break", "any", "minecraft:dirt", None)?
//!     .with_reason("no digging");
//! let result = service.apply(&caller, &Subject::Global, &*claim, request);
//! caller.send_message(result.message());
//! ```

// Allow the crate to refer to itself as `griefprevention_core` for proc macro compatibility
extern crate self as griefprevention_core;

pub use griefprevention_api as api;
pub use griefprevention_host as host;

pub mod apply;
pub mod bans;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod flags;
pub mod logging;
pub mod permissions;
pub mod resolve;
pub mod service;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use apply::{authorize, compute_toggle, FlagRequest};
pub use bans::BanReasons;
pub use config::{ConfigError, ConfigResult, GriefPreventionConfig};
pub use context::{
    ban_context, default_contexts_for, override_contexts_for, resolve_context, ContextKind,
};
pub use error::{FlagError, FlagOpResult, FlagResult};
pub use events::{FlagChangeEvent, FlagEventBus, HookResult, ListenerKey};
pub use flags::{decode, encode, ClaimFlag, DecodedFlag, DefaultsTable, FlagKey, TargetKinds};
pub use permissions::{nodes, MemoryPermissionStore, PermissionSet, StaticCaller};
pub use resolve::{FlagLayers, ResolvedEntry};
pub use service::FlagService;
pub use session::FlagSession;

// Re-export macros
pub use griefprevention_macros::FlagEnum;

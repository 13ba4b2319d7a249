//! GriefPrevention API - Claim and Permission Value Types
//!
//! This crate contains the plain value types shared between the flag engine
//! and host integrations. It depends only on `uuid`, so integrations can
//! name claims, contexts and subjects without pulling in the engine.
//!
//! # Modules
//!
//! - [`claim`] - Claim identifiers and claim types
//! - [`context`] - Permission scoping contexts
//! - [`subject`] - Permission holders (players, groups, the global subject)
//! - [`tristate`] - Three-valued permission results
//! - [`flag_type`] - Resolution layers and listing tabs

pub mod claim;
pub mod context;
pub mod flag_type;
pub mod subject;
pub mod tristate;

pub use claim::{ClaimId, ClaimType};
pub use context::{context_keys, Context, ContextSet};
pub use flag_type::FlagType;
pub use subject::Subject;
pub use tristate::Tristate;

/// Error returned when parsing one of the API enums from a string fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What was being parsed (e.g. "claim type")
    pub kind: &'static str,
    /// The rejected input
    pub input: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: '{}'", self.kind, self.input)
    }
}

impl std::error::Error for ParseError {}

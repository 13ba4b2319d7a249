//! Flag event types

use std::sync::Arc;

use griefprevention_api::{ClaimId, ClaimType, ContextSet, FlagType, Subject, Tristate};

use crate::flags::FlagKey;

/// Result from a pre-change listener determining how to proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum HookResult {
    /// Allow the change and keep calling other listeners
    #[default]
    Continue = 0,

    /// Veto the change, but continue calling other listeners
    Cancel = 3,

    /// Veto the change AND stop calling other listeners
    Stop = 4,
}

impl HookResult {
    /// Whether this result vetoes the change
    pub fn is_veto(self) -> bool {
        self >= Self::Cancel
    }
}

/// A claim flag change, published before and after the store write
#[derive(Debug, Clone)]
pub struct FlagChangeEvent {
    /// Name of the caller requesting the change
    pub caller: String,
    pub subject: Subject,
    pub claim_id: ClaimId,
    pub claim_type: ClaimType,
    /// Layer being written
    pub flag_type: FlagType,
    /// Context set the value is written under
    pub contexts: ContextSet,
    pub key: FlagKey,
    pub value: Tristate,
    /// Ban reason, for wilderness overrides
    pub reason: Option<String>,
}

/// Listener called before a flag change commits
///
/// # Returns
/// `HookResult` indicating whether the change may proceed
pub type PreChangeCallback = Arc<dyn Fn(&FlagChangeEvent) -> HookResult + Send + Sync>;

/// Listener called after a flag change committed
pub type PostChangeCallback = Arc<dyn Fn(&FlagChangeEvent) + Send + Sync>;

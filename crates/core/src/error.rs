//! Flag engine errors and mutation results

use griefprevention_api::ClaimId;

/// Error type for flag encoding, authorization and mutation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagError {
    /// Unrecognised context scope name
    #[error("Invalid context '{0}'")]
    InvalidContext(String),

    /// Target identifier unknown to the registries, or malformed
    #[error("Target '{0}' is not valid for this flag")]
    TargetNotValid(String),

    /// Permission key does not name a known flag
    #[error("Unknown flag '{0}'")]
    InvalidFlag(String),

    /// Caller failed one of the authorization gates
    #[error("No permission: {0}")]
    NoPermission(String),

    /// The value is inherited and must be edited on the claim supplying it
    #[error("Value is inherited from claim {0}")]
    InheritedEntry(ClaimId),

    /// A flag change listener vetoed the mutation
    #[error("Flag change cancelled by a listener")]
    EventCancelled,

    /// The permission store refused the write
    #[error("Permission store rejected write of '{0}'")]
    StoreWriteFailed(String),
}

/// Result type for flag operations
pub type FlagOpResult<T> = Result<T, FlagError>;

/// Outcome of a flag mutation, one variant per user-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagResult {
    Success,
    NoPermission,
    TargetNotValid,
    InvalidContext,
    EventCancelled,
    StoreFailure,
}

impl FlagResult {
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Player-facing message for this outcome
    pub const fn message(self) -> &'static str {
        match self {
            Self::Success => "Flag updated.",
            Self::NoPermission => "You do not have permission to change this flag.",
            Self::TargetNotValid => "That target is not valid for this flag.",
            Self::InvalidContext => {
                "That context is not valid. Use 'default', 'override' or 'ban'."
            }
            Self::EventCancelled => "The flag change was cancelled by a plugin.",
            Self::StoreFailure => "The flag could not be saved.",
        }
    }
}

impl From<&FlagError> for FlagResult {
    fn from(error: &FlagError) -> Self {
        match error {
            FlagError::InvalidContext(_) => Self::InvalidContext,
            FlagError::TargetNotValid(_) | FlagError::InvalidFlag(_) => Self::TargetNotValid,
            FlagError::NoPermission(_) | FlagError::InheritedEntry(_) => Self::NoPermission,
            FlagError::EventCancelled => Self::EventCancelled,
            FlagError::StoreWriteFailed(_) => Self::StoreFailure,
        }
    }
}

impl From<FlagError> for FlagResult {
    fn from(error: FlagError) -> Self {
        Self::from(&error)
    }
}

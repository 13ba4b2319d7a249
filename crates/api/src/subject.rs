//! Permission holders

use std::fmt;

use uuid::Uuid;

use crate::FlagType;

/// Holder of a permission set.
///
/// Subjects are owned by the host permission service; the flag engine only
/// reads and writes through the permission store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subject {
    /// Applies to all players uniformly
    Global,
    /// A permission group, by name
    Group(String),
    /// An individual player, by UUID
    User(Uuid),
}

impl Subject {
    pub fn group(name: impl Into<String>) -> Self {
        Self::Group(name.into())
    }

    /// The subject-kind listing tab for this subject, if any
    pub fn flag_type(&self) -> Option<FlagType> {
        match self {
            Self::Global => None,
            Self::Group(_) => Some(FlagType::Group),
            Self::User(_) => Some(FlagType::Player),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("ALL"),
            Self::Group(name) => write!(f, "group:{}", name),
            Self::User(id) => write!(f, "user:{}", id),
        }
    }
}

//! Claim identity types

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::ParseError;

/// Unique identifier of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId(pub Uuid);

impl ClaimId {
    /// Generate a fresh random claim id
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ClaimId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of claim
///
/// Every claim type has its own DEFAULT and OVERRIDE scoping context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClaimType {
    /// The implicit claim covering all unclaimed land of a world
    Wilderness,
    /// Server-owned claim
    Admin,
    /// Player-owned top level claim
    Basic,
    /// Claim nested inside another claim
    Subdivision,
    /// Player-owned town claim
    Town,
}

impl ClaimType {
    /// All claim types, in declaration order
    pub const ALL: [ClaimType; 5] = [
        Self::Wilderness,
        Self::Admin,
        Self::Basic,
        Self::Subdivision,
        Self::Town,
    ];

    /// Lowercase name used in contexts and config files
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wilderness => "wilderness",
            Self::Admin => "admin",
            Self::Basic => "basic",
            Self::Subdivision => "subdivision",
            Self::Town => "town",
        }
    }

    pub const fn is_wilderness(self) -> bool {
        matches!(self, Self::Wilderness)
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClaimType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| ParseError {
                kind: "claim type",
                input: s.to_string(),
            })
    }
}

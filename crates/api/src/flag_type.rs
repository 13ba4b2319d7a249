//! Flag resolution layers

use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// Which resolution layer a flag value lives in.
///
/// `All` is a display-only aggregate. `Default`, `Claim`, `Override` and
/// `Inherit` are resolution layers. `Group` and `Player` name the kind of
/// subject being configured and are orthogonal to the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FlagType {
    #[default]
    All,
    Default,
    Claim,
    Override,
    Inherit,
    Group,
    Player,
}

impl FlagType {
    pub const ALL_TYPES: [FlagType; 7] = [
        Self::All,
        Self::Default,
        Self::Claim,
        Self::Override,
        Self::Inherit,
        Self::Group,
        Self::Player,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Default => "DEFAULT",
            Self::Claim => "CLAIM",
            Self::Override => "OVERRIDE",
            Self::Inherit => "INHERIT",
            Self::Group => "GROUP",
            Self::Player => "PLAYER",
        }
    }

    /// Whether this is one of the four resolution layers
    pub const fn is_layer(self) -> bool {
        matches!(
            self,
            Self::Default | Self::Claim | Self::Override | Self::Inherit
        )
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlagType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL_TYPES
            .into_iter()
            .find(|t| t.name() == upper)
            .ok_or_else(|| ParseError {
                kind: "flag type",
                input: s.to_string(),
            })
    }
}

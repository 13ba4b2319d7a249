//! Three-valued permission result

use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// Result of a permission lookup.
///
/// `Undefined` means the layer has no explicit value and resolution falls
/// through to the next layer. It is not the same as `False`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tristate {
    True,
    False,
    #[default]
    Undefined,
}

impl Tristate {
    /// Convert a boolean into a defined tristate
    pub const fn from_bool(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }

    /// `None` maps to `Undefined`
    pub const fn from_option(value: Option<bool>) -> Self {
        match value {
            Some(v) => Self::from_bool(v),
            None => Self::Undefined,
        }
    }

    /// The boolean value, or `None` when undefined
    pub const fn as_option(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Undefined => None,
        }
    }

    /// Whether this is `True` or `False`
    pub const fn is_defined(self) -> bool {
        !matches!(self, Self::Undefined)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::Undefined => "undefined",
        }
    }
}

impl From<bool> for Tristate {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl From<Option<bool>> for Tristate {
    fn from(value: Option<bool>) -> Self {
        Self::from_option(value)
    }
}

impl fmt::Display for Tristate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tristate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "true" => Ok(Self::True),
            "false" => Ok(Self::False),
            "undefined" => Ok(Self::Undefined),
            _ => Err(ParseError {
                kind: "tristate",
                input: s.to_string(),
            }),
        }
    }
}

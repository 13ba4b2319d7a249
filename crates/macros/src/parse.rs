//! Attribute parsing for the FlagEnum derive macro

use darling::{FromDeriveInput, FromVariant};
use syn::{DeriveInput, Ident};

/// Parsed enum carrying `#[flag(...)]` variant attributes
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(flag), supports(enum_unit))]
pub struct FlagEnumArgs {
    /// Enum identifier
    pub ident: Ident,

    /// Enum variants
    pub data: darling::ast::Data<FlagVariantArgs, ()>,
}

/// Parsed #[flag(...)] attributes on a variant
#[derive(Debug, FromVariant)]
#[darling(attributes(flag))]
pub struct FlagVariantArgs {
    /// Variant identifier
    pub ident: Ident,

    /// Permission name of the flag (e.g., "block-break")
    pub name: String,

    /// Human-readable description
    #[darling(default)]
    pub description: Option<String>,

    /// Accepts block type targets
    #[darling(default)]
    pub block: bool,

    /// Accepts item type targets
    #[darling(default)]
    pub item: bool,

    /// Accepts entity type targets
    #[darling(default)]
    pub entity: bool,

    /// Accepts command targets
    #[darling(default)]
    pub command: bool,
}

impl FlagVariantArgs {
    /// Target kind bits, matching `TargetKinds` in the core crate
    pub fn target_bits(&self) -> u8 {
        let mut bits = 0;
        if self.block {
            bits |= 0x01;
        }
        if self.item {
            bits |= 0x02;
        }
        if self.entity {
            bits |= 0x04;
        }
        if self.command {
            bits |= 0x08;
        }
        bits
    }

    /// Whether the name is a valid permission segment
    pub fn has_valid_name(&self) -> bool {
        !self.name.is_empty()
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

/// Parse a DeriveInput into FlagEnumArgs
pub fn parse_flag_enum(input: &DeriveInput) -> darling::Result<FlagEnumArgs> {
    FlagEnumArgs::from_derive_input(input)
}

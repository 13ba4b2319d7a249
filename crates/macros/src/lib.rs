//! GriefPrevention Proc Macros
//!
//! This crate provides proc macros for the GriefPrevention flag engine:
//!
//! - `#[derive(FlagEnum)]` - Generate the name table, lookup and target
//!   validators for a closed enumeration of claim flags
//!
//! # FlagEnum Example
//!
//! ```ignore
//! use griefprevention_macros::FlagEnum;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, FlagEnum)]
//! pub enum ClaimFlag {
//!     #[flag(name = "block-break", description = "Breaking blocks", block)]
//!     BlockBreak,
//!
//!     #[flag(name = "item-use", item)]
//!     ItemUse,
//! }
//!
//! // Generated:
//! // - ClaimFlag::ALL
//! // - flag.name() -> "block-break"
//! // - flag.description() -> "Breaking blocks"
//! // - flag.targets() -> TargetKinds::BLOCK
//! // - ClaimFlag::from_name("block-break") -> Some(ClaimFlag::BlockBreak)
//! ```
//!
//! # Attributes
//!
//! ## Variant Attributes
//!
//! - `#[flag(name = "flag-name")]` - **Required.** The permission segment.
//! - `#[flag(description = "...")]` - Optional. Shown in flag listings.
//! - `#[flag(block, item, entity, command)]` - Target kinds the flag accepts.
//!
//! The generated code refers to `::griefprevention_core::flags::TargetKinds`.

mod flag_enum;
mod parse;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro for claim flag enumerations
///
/// Generates, for a unit-only enum whose variants all carry
/// `#[flag(name = "...")]`:
///
/// - `ALL` - every variant in declaration order
/// - `name()` / `from_name()` - permission name mapping
/// - `description()` - listing text
/// - `targets()` - accepted target kinds
/// - a `Display` impl printing the name
///
/// Flag names are checked at compile time: they must be non-empty,
/// lowercase kebab-case and unique.
#[proc_macro_derive(FlagEnum, attributes(flag))]
pub fn derive_flag_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    flag_enum::derive_flag_enum(input).into()
}

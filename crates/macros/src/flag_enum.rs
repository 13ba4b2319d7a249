//! FlagEnum derive macro implementation

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::parse::{parse_flag_enum, FlagEnumArgs, FlagVariantArgs};

/// Generate the FlagEnum implementation
pub fn derive_flag_enum(input: DeriveInput) -> TokenStream {
    match parse_flag_enum(&input) {
        Ok(args) => generate_impl(args),
        Err(e) => e.write_errors(),
    }
}

fn generate_impl(args: FlagEnumArgs) -> TokenStream {
    let enum_name = &args.ident;

    let variants = match args.data.take_enum() {
        Some(variants) => variants,
        None => {
            return syn::Error::new_spanned(enum_name, "FlagEnum can only be derived for enums")
                .to_compile_error()
        }
    };

    if let Some(error) = validate(&variants) {
        return error;
    }

    let idents: Vec<_> = variants.iter().map(|v| &v.ident).collect();
    let names: Vec<_> = variants.iter().map(|v| v.name.as_str()).collect();
    let descriptions: Vec<_> = variants
        .iter()
        .map(|v| v.description.clone().unwrap_or_default())
        .collect();
    let bits: Vec<_> = variants.iter().map(FlagVariantArgs::target_bits).collect();
    let count = variants.len();

    quote! {
        impl #enum_name {
            /// Every variant, in declaration order
            pub const ALL: [#enum_name; #count] = [#(#enum_name::#idents),*];

            /// Permission name of this flag (e.g. `block-break`)
            pub const fn name(&self) -> &'static str {
                match self {
                    #(#enum_name::#idents => #names,)*
                }
            }

            /// Human-readable description
            pub const fn description(&self) -> &'static str {
                match self {
                    #(#enum_name::#idents => #descriptions,)*
                }
            }

            /// Kinds of target identifiers this flag accepts
            pub const fn targets(&self) -> ::griefprevention_core::flags::TargetKinds {
                match self {
                    #(
                        #enum_name::#idents => {
                            ::griefprevention_core::flags::TargetKinds::from_bits_retain(#bits)
                        }
                    )*
                }
            }

            /// Look up a flag by permission name (case-insensitive)
            pub fn from_name(name: &str) -> ::std::option::Option<Self> {
                match name.to_ascii_lowercase().as_str() {
                    #(#names => ::std::option::Option::Some(#enum_name::#idents),)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl ::std::fmt::Display for #enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    }
}

/// Reject malformed or duplicate flag names at compile time
fn validate(variants: &[FlagVariantArgs]) -> Option<TokenStream> {
    let mut seen = HashSet::new();
    for variant in variants {
        if !variant.has_valid_name() {
            return Some(
                syn::Error::new_spanned(
                    &variant.ident,
                    format!(
                        "flag name '{}' must be lowercase letters, digits and '-'",
                        variant.name
                    ),
                )
                .to_compile_error(),
            );
        }
        if !seen.insert(variant.name.as_str()) {
            return Some(
                syn::Error::new_spanned(
                    &variant.ident,
                    format!("duplicate flag name '{}'", variant.name),
                )
                .to_compile_error(),
            );
        }
    }
    None
}

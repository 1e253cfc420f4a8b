//! Procedural macros for `flagbind`.
//!
//! `#[derive(Record)]` is the compile-time counterpart of runtime field
//! reflection: it reports every named field of a struct to a visitor,
//! together with static metadata harvested from `#[flag(...)]` helper
//! attributes. Tag keys are free-form identifiers; which keys carry the
//! flag name, shorthand and help text is decided at runtime by the
//! builder configuration.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro making a struct visitable for flag binding.
///
/// Recognized field attributes: `#[flag(flatten)]` marks an embedded
/// record (no name prefix); any `#[flag(key = "value")]` pair becomes a
/// metadata tag. The container attribute `#[flag(crate = "path")]`
/// redirects generated paths when the runtime crate is renamed.
#[proc_macro_derive(Record, attributes(flag))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

//! Derive expansion pipeline: parse the input struct, then generate the
//! `Record` and `Bindable` impls.

mod crate_path;
mod generate;
mod parse;
mod type_utils;

use proc_macro2::TokenStream;
use syn::DeriveInput;

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let record = parse::parse_input(input)?;
    Ok(generate::record_impl(&record))
}

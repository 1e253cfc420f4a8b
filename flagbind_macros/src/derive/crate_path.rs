//! Resolution of the path generated code uses to reach the runtime crate.
//!
//! Generated impls refer to runtime items by absolute `::flagbind` paths.
//! A consumer that renames the dependency, or re-exports it from another
//! crate, supplies the replacement root via `#[flag(crate = "...")]`.

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    match crate_path {
        Some(path) => quote! { #path },
        None => quote! { ::flagbind },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unset(None, ":: flagbind")]
    #[case::renamed(Some("fb"), "fb")]
    #[case::reexported(Some("my_app::deps::flagbind"), "my_app :: deps :: flagbind")]
    #[case::absolute(Some("::flagbind_fork"), ":: flagbind_fork")]
    fn substitutes_the_crate_root(#[case] input: Option<&str>, #[case] expected: &str) {
        let parsed = input.map(|s| syn::parse_str::<syn::Path>(s).expect("valid path"));
        assert_eq!(resolve(parsed.as_ref()).to_string(), expected);
    }
}

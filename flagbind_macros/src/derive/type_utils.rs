//! Shallow type inspection for recognizing `Option<T>` fields.

use syn::{GenericArgument, PathArguments, Type};

/// Returns the inner type if `ty` is `Option<T>`.
///
/// The check is shallow: only the outermost path is inspected, and
/// fully-qualified forms like `std::option::Option<T>` are matched by
/// their final segment.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let last = path.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    let GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("Option<u64>", true)]
    #[case::qualified("std::option::Option<String>", true)]
    #[case::nested_vec("Option<Vec<String>>", true)]
    #[case::not_option("Vec<u64>", false)]
    #[case::bare("u64", false)]
    fn recognizes_option(#[case] ty: &str, #[case] expected: bool) {
        let parsed: Type = syn::parse_str(ty).expect("valid type");
        assert_eq!(option_inner(&parsed).is_some(), expected);
    }
}

//! Parsing of the derive input: struct shape checks and `#[flag(...)]`
//! attribute harvesting.

use syn::{Data, DeriveInput, Fields, Visibility};

use super::type_utils;

/// Parsed representation of the struct being derived.
pub(crate) struct RecordInput {
    pub ident: syn::Ident,
    pub crate_path: Option<syn::Path>,
    pub fields: Vec<FieldInput>,
}

/// Parsed representation of one named field.
pub(crate) struct FieldInput {
    pub ident: syn::Ident,
    /// Declared `pub`; untagged non-public fields produce no flag.
    pub public: bool,
    /// Carries `#[flag(flatten)]`.
    pub flatten: bool,
    /// Field type is `Option<T>`.
    pub optional: bool,
    /// Tag key/value pairs, in declaration order.
    pub tags: Vec<(String, String)>,
}

pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<RecordInput> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Record can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &data.fields,
            "Record requires named fields",
        ));
    };
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record does not support generic structs",
        ));
    }

    let crate_path = parse_container_attrs(input)?;
    let fields = named
        .named
        .iter()
        .map(parse_field)
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(RecordInput {
        ident: input.ident.clone(),
        crate_path,
        fields,
    })
}

fn parse_container_attrs(input: &DeriveInput) -> syn::Result<Option<syn::Path>> {
    let mut crate_path = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("flag") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                crate_path = Some(lit.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported container attribute; expected `crate`"))
            }
        })?;
    }
    Ok(crate_path)
}

fn parse_field(field: &syn::Field) -> syn::Result<FieldInput> {
    let ident = field
        .ident
        .clone()
        .unwrap_or_else(|| unreachable!("named fields checked by caller"));
    let mut flatten = false;
    let mut tags = Vec::new();

    for attr in &field.attrs {
        if !attr.path().is_ident("flag") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("flatten") {
                flatten = true;
                return Ok(());
            }
            let key = meta
                .path
                .get_ident()
                .ok_or_else(|| meta.error("tag keys must be plain identifiers"))?
                .to_string();
            let value: syn::LitStr = meta.value()?.parse()?;
            tags.push((key, value.value()));
            Ok(())
        })?;
    }

    Ok(FieldInput {
        public: matches!(field.vis, Visibility::Public(_)),
        flatten,
        optional: type_utils::option_inner(&field.ty).is_some(),
        tags,
        ident,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn parse(input: DeriveInput) -> RecordInput {
        parse_input(&input).expect("valid input")
    }

    #[test]
    fn harvests_tags_in_order() {
        let record = parse(parse_quote! {
            struct Demo {
                #[flag(
                    json = "addr,omitempty",
                    flag = "address",
                    short = "a",
                    help = "listen address"
                )]
                addr: String,
            }
        });
        assert_eq!(
            record.fields[0].tags,
            vec![
                ("json".to_owned(), "addr,omitempty".to_owned()),
                ("flag".to_owned(), "address".to_owned()),
                ("short".to_owned(), "a".to_owned()),
                ("help".to_owned(), "listen address".to_owned()),
            ]
        );
    }

    #[test]
    fn records_visibility_flatten_and_optionality() {
        let record = parse(parse_quote! {
            struct Demo {
                pub visible: bool,
                hidden: bool,
                #[flag(flatten)]
                pub inner: Inner,
                retries: Option<i64>,
            }
        });
        assert!(record.fields[0].public);
        assert!(!record.fields[1].public);
        assert!(record.fields[2].flatten);
        assert!(record.fields[3].optional);
        assert!(!record.fields[0].optional);
    }

    #[test]
    fn accepts_crate_override() {
        let record = parse(parse_quote! {
            #[flag(crate = "my_alias")]
            struct Demo {
                pub value: u64,
            }
        });
        assert!(record.crate_path.is_some());
    }

    #[test]
    fn rejects_enums_and_tuple_structs() {
        let as_enum: DeriveInput = parse_quote! {
            enum Demo { A, B }
        };
        assert!(parse_input(&as_enum).is_err());

        let tuple: DeriveInput = parse_quote! {
            struct Demo(u64);
        };
        assert!(parse_input(&tuple).is_err());
    }

    #[test]
    fn rejects_generic_structs() {
        let generic: DeriveInput = parse_quote! {
            struct Demo<T> {
                pub value: T,
            }
        };
        assert!(parse_input(&generic).is_err());
    }
}

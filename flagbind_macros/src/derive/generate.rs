//! Code generation for the `Record` and `Bindable` impls.

use proc_macro2::TokenStream;
use quote::quote;

use super::crate_path;
use super::parse::{FieldInput, RecordInput};

pub(crate) fn record_impl(record: &RecordInput) -> TokenStream {
    let krate = crate_path::resolve(record.crate_path.as_ref());
    let ident = &record.ident;
    let type_name = ident.to_string();
    let field_blocks: Vec<TokenStream> = record
        .fields
        .iter()
        .map(|field| field_block(&krate, field))
        .collect();
    let unused_visitor = if field_blocks.is_empty() {
        quote! { let _ = __visitor; }
    } else {
        TokenStream::new()
    };

    quote! {
        #[automatically_derived]
        impl #krate::Record for #ident {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn visit<'a>(&'a mut self, __visitor: &mut dyn #krate::FieldVisitor<'a>) {
                #unused_visitor
                #( #field_blocks )*
            }
        }

        #[automatically_derived]
        impl #krate::Bindable for #ident {
            fn field_target(&mut self) -> #krate::FieldTarget<'_> {
                #krate::FieldTarget::Nested(self)
            }
        }
    }
}

fn field_block(krate: &TokenStream, field: &FieldInput) -> TokenStream {
    let ident = &field.ident;
    let name = ident.to_string();
    let public = field.public;
    let flatten = field.flatten;
    let tag_pairs: Vec<TokenStream> = field
        .tags
        .iter()
        .map(|(key, value)| quote! { (#key, #value) })
        .collect();
    let meta = quote! {
        static __META: #krate::FieldMeta = #krate::FieldMeta {
            name: #name,
            tags: &[ #( #tag_pairs ),* ],
            public: #public,
            flatten: #flatten,
        };
    };

    if field.optional {
        // Absent optional fields are materialized only when explicitly
        // annotated; the visitor decides, since tag meaning is runtime
        // configuration.
        quote! {
            {
                #meta
                if self.#ident.is_none() && __visitor.materialize_absent(&__META) {
                    self.#ident = ::core::option::Option::Some(::core::default::Default::default());
                }
                if let ::core::option::Option::Some(__inner) = self.#ident.as_mut() {
                    use #krate::{BindCustom as _, BindField as _};
                    let __probe = #krate::Probe::new(__inner);
                    __visitor.visit_field(&__META, (&__probe).resolve());
                }
            }
        }
    } else {
        quote! {
            {
                #meta
                use #krate::{BindCustom as _, BindField as _};
                let __probe = #krate::Probe::new(&mut self.#ident);
                __visitor.visit_field(&__META, (&__probe).resolve());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::parse::parse_input;
    use syn::parse_quote;

    fn expand(input: syn::DeriveInput) -> TokenStream {
        record_impl(&parse_input(&input).expect("valid input"))
    }

    #[test]
    fn output_parses_as_rust() {
        let tokens = expand(parse_quote! {
            struct Demo {
                #[flag(flag = "name", short = "n")]
                name: String,
                #[flag(flatten)]
                pub inner: Inner,
                retries: Option<i64>,
            }
        });
        syn::parse2::<syn::File>(tokens).expect("generated code parses");
    }

    #[test]
    fn emits_both_impls_and_type_name() {
        let rendered = expand(parse_quote! {
            struct Demo {
                pub value: u64,
            }
        })
        .to_string();
        assert!(rendered.contains(":: flagbind :: Record for Demo"));
        assert!(rendered.contains(":: flagbind :: Bindable for Demo"));
        assert!(rendered.contains("\"Demo\""));
    }

    #[test]
    fn optional_fields_materialize_through_the_visitor() {
        let rendered = expand(parse_quote! {
            struct Demo {
                retries: Option<i64>,
            }
        })
        .to_string();
        assert!(rendered.contains("materialize_absent"));
        assert!(rendered.contains("as_mut"));
    }

    #[test]
    fn empty_records_still_compile_cleanly() {
        let tokens = expand(parse_quote! {
            struct Demo {}
        });
        syn::parse2::<syn::File>(tokens).expect("generated code parses");
    }
}

use inflections::Inflect;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Fields, FieldsNamed, ItemStruct};

use crate::field_type::declared_field_type;

/// Expands `#[derive(NodeType)] struct Comment { ... }` for a struct whose
/// fields are all plain scalar/node values: each named field becomes a
/// field declaration read directly off the wrapped struct, with no method
/// indirection needed.
pub fn expand(item: ItemStruct) -> Result<TokenStream, String> {
    let self_ty = &item.ident;
    let schema_name = self_ty.to_string();

    let named = match &item.fields {
        Fields::Named(FieldsNamed { named, .. }) => named,
        _ => return Err("`#[derive(NodeType)]` only supports structs with named fields".to_owned()),
    };

    let field_defs: Vec<TokenStream> = named
        .iter()
        .map(|field| {
            let ident = field.ident.as_ref().expect("named field");
            let name = ident.to_string().to_camel_case();
            let declared_type = declared_field_type(&field.ty, None);

            quote! {
                nodeql_schema::FieldDef::new(
                    #name,
                    #declared_type,
                    |target, _arguments, _context| {
                        let this = target
                            .downcast_ref::<#self_ty>()
                            .expect(concat!(stringify!(#self_ty), " node type always wraps a ", stringify!(#self_ty)));
                        Ok(nodeql_schema::IntoIntermediate::into_intermediate(this.#ident.clone()))
                    },
                )
            }
        })
        .collect();

    Ok(quote! {
        impl #self_ty {
            /// Builds this type's node type declaration, ready to hand to
            /// `SchemaRegistry::register`.
            pub fn node_type<C: 'static>() -> nodeql_schema::NodeType<C> {
                nodeql_schema::NodeTypeBuilder::new(#schema_name)
                    #(.field(#field_defs))*
                    .build()
            }
        }

        impl nodeql_schema::IntoIntermediate for #self_ty {
            fn into_intermediate(self) -> nodeql_core::Intermediate {
                nodeql_core::Intermediate::entity(self)
            }
        }
    })
}

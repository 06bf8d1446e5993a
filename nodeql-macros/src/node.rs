use darling::FromMeta;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{AttributeArgs, ImplItem, ItemImpl, LitStr, Type};

use crate::field::Field;

#[derive(Debug, FromMeta)]
struct NodeAttrs {
    rename: Option<LitStr>,
    parent: Option<LitStr>,
    connection_for: Option<LitStr>,
    context: Option<LitStr>,
}

/// Expands `#[node] impl Type { ... }` into the original methods, an
/// [`nodeql_schema::IntoIntermediate`] impl that lets `Type` back a node
/// field elsewhere in the schema, and a `Type::node_type::<C>()` associated
/// function that builds the registered [`nodeql_schema::NodeType`].
pub fn expand(args: AttributeArgs, item: ItemImpl) -> Result<TokenStream, String> {
    let attrs = NodeAttrs::from_list(&args).map_err(|err| err.to_string())?;

    let self_ty = item.self_ty.clone();
    let generics = item.generics.clone();
    let where_clause = item.generics.where_clause.clone();

    let schema_name = attrs
        .rename
        .map(|lit| lit.value())
        .unwrap_or_else(|| match &*self_ty {
            syn::Type::Path(ty) => ty.path.segments.last().unwrap().ident.to_string(),
            _ => panic!("`#[node]` only supports a plain named type"),
        });

    let fields: Vec<Field> = item
        .items
        .into_iter()
        .filter_map(|item| match item {
            ImplItem::Method(method) => Some(Field::new(method)),
            _ => None,
        })
        .collect();

    let needs_context = fields.iter().any(Field::has_context) || attrs.context.is_some();
    let context_ty: Option<Type> = attrs
        .context
        .map(|lit| syn::parse_str(&lit.value()).expect("`context` must name a type"));

    if needs_context && context_ty.is_none() {
        return Err(
            "a field takes a `context` parameter; declare its concrete type with `#[node(context = \"...\")]`"
                .to_owned(),
        );
    }

    let node_type_sig = match &context_ty {
        Some(ty) => quote! { pub fn node_type() -> nodeql_schema::NodeType<#ty> },
        None => quote! { pub fn node_type<C: 'static>() -> nodeql_schema::NodeType<C> },
    };

    let field_defs: Vec<TokenStream> = fields.iter().map(|field| field.field_def(&self_ty)).collect();
    let methods = fields.into_iter().map(Field::into_method).collect::<Vec<_>>();

    let parent = match attrs.parent {
        Some(name) => {
            let name = name.value();
            quote! { .parent(#name) }
        }
        None => quote! {},
    };

    let connection_for = match attrs.connection_for {
        Some(name) => {
            let name = name.value();
            quote! { .connection_for(#name) }
        }
        None => quote! {},
    };

    Ok(quote! {
        impl #generics #self_ty #where_clause {
            #(#methods)*

            /// Builds this type's node type declaration, ready to hand to
            /// `SchemaRegistry::register`.
            #node_type_sig {
                nodeql_schema::NodeTypeBuilder::new(#schema_name)
                    #parent
                    #connection_for
                    #(.field(#field_defs))*
                    .build()
            }
        }

        impl #generics nodeql_schema::IntoIntermediate for #self_ty #where_clause {
            fn into_intermediate(self) -> nodeql_core::Intermediate {
                nodeql_core::Intermediate::entity(self)
            }
        }
    })
}

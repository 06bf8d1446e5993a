use darling::FromAttributes;
use inflections::Inflect;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, FnArg, ImplItemMethod, Lit, Meta, Pat, Type};

use crate::field_type::{argument_expr, declared_field_type};

#[derive(Debug, Default, FromAttributes)]
#[darling(attributes(field))]
struct FieldAttrs {
    rename: Option<syn::LitStr>,
    returns: Option<syn::LitStr>,
}

fn extract_doc(attrs: &[Attribute]) -> Option<String> {
    attrs.iter().find_map(|attr| match attr.path.get_ident()?.to_string().as_str() {
        "doc" => match attr.parse_meta().ok()? {
            Meta::NameValue(meta) => match meta.lit {
                Lit::Str(text) => Some(text.value().trim().to_owned()),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    })
}

/// One method of a `#[node]`-annotated `impl` block, parsed into the shape
/// a [`FieldDef`](nodeql_schema::FieldDef) needs: its schema name, its
/// declared type, and how to pull its positional arguments and context
/// parameter (if any) out of a resolver call before invoking the method.
pub struct Field {
    method: ImplItemMethod,
    schema_name: String,
    description: Option<String>,
    has_context: bool,
    arguments: Vec<Type>,
    returns_override: Option<String>,
}

impl Field {
    pub fn new(method: ImplItemMethod) -> Field {
        let attrs = FieldAttrs::from_attributes(&method.attrs).unwrap_or_default();
        let description = extract_doc(&method.attrs);

        let schema_name = match &attrs.rename {
            Some(rename) => rename.value(),
            None => method.sig.ident.to_string().to_camel_case(),
        };

        let has_context = method.sig.inputs.iter().any(|input| match input {
            FnArg::Typed(pat) => matches!(&*pat.pat, Pat::Ident(ident) if ident.ident == "context"),
            _ => false,
        });

        let arguments = method
            .sig
            .inputs
            .iter()
            .filter_map(|input| match input {
                FnArg::Typed(pat) => match &*pat.pat {
                    Pat::Ident(ident) if ident.ident != "context" => Some((*pat.ty).clone()),
                    _ => None,
                },
                FnArg::Receiver(_) => None,
            })
            .collect();

        let mut method = method;
        strip_field_attr(&mut method.attrs);
        for input in method.sig.inputs.iter_mut() {
            if let FnArg::Typed(pat) = input {
                strip_field_attr(&mut pat.attrs);
            }
        }

        Field {
            schema_name,
            description,
            has_context,
            arguments,
            returns_override: attrs.returns.map(|lit| lit.value()),
            method,
        }
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn ident(&self) -> &syn::Ident {
        &self.method.sig.ident
    }

    /// True if this method takes a `context: &C` parameter, meaning the
    /// node type it belongs to can only be built for one concrete context
    /// type (see `#[node(context = "...")]`).
    pub fn has_context(&self) -> bool {
        self.has_context
    }

    /// Builds the `FieldDef::new(...)` expression this method contributes
    /// to the node type's builder chain.
    pub fn field_def(&self, self_ty: &Type) -> TokenStream {
        let name = &self.schema_name;
        let ident = self.ident();

        let return_ty = match &self.method.sig.output {
            syn::ReturnType::Default => None,
            syn::ReturnType::Type(_, ty) => Some((**ty).clone()),
        };
        let declared_type = match &return_ty {
            Some(ty) => declared_field_type(ty, self.returns_override.as_deref()),
            None => quote! { nodeql_schema::FieldType::Scalar(nodeql_schema::ScalarTag::Boolean) },
        };

        let context_arg = match self.has_context {
            true => quote! { context, },
            false => quote! {},
        };

        let arg_exprs: Vec<TokenStream> = self
            .arguments
            .iter()
            .enumerate()
            .map(|(index, ty)| argument_expr(ty, index))
            .collect();

        let description = match &self.description {
            Some(text) => quote! { .description(#text) },
            None => quote! {},
        };

        quote! {
            nodeql_schema::FieldDef::new(
                #name,
                #declared_type,
                |target, arguments, context| {
                    let this = target
                        .downcast_ref::<#self_ty>()
                        .expect(concat!(stringify!(#self_ty), " node type always wraps a ", stringify!(#self_ty)));
                    let result = this.#ident(#context_arg #(#arg_exprs),*);
                    Ok(nodeql_schema::IntoIntermediate::into_intermediate(result))
                },
            )#description
        }
    }

    pub fn into_method(self) -> ImplItemMethod {
        self.method
    }
}

fn strip_field_attr(attrs: &mut Vec<Attribute>) {
    *attrs = std::mem::take(attrs)
        .into_iter()
        .filter(|attr| attr.path.get_ident().map(|ident| ident != "field").unwrap_or(true))
        .collect();
}

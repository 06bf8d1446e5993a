use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, PathArguments, Type};

/// Strips a leading `&`/`&mut` so callers can dispatch on the named type
/// underneath a reference parameter.
pub fn strip_reference(ty: &Type) -> &Type {
    match ty {
        Type::Reference(reference) => &reference.elem,
        _ => ty,
    }
}

/// Strips one layer of `Option<...>` so a field can declare its scalar or
/// node kind in terms of the wrapped type.
pub fn strip_option(ty: &Type) -> &Type {
    last_segment_ident(ty)
        .filter(|ident| ident == "Option")
        .and_then(|_| single_generic_argument(ty))
        .unwrap_or(ty)
}

fn last_segment_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(path) => path.path.segments.last().map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

fn single_generic_argument(ty: &Type) -> Option<&Type> {
    match ty {
        Type::Path(path) => {
            let segment = path.path.segments.last()?;
            match &segment.arguments {
                PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
                    GenericArgument::Type(ty) => Some(ty),
                    _ => None,
                }),
                _ => None,
            }
        }
        _ => None,
    }
}

/// The scalar tag a Rust primitive maps to, if it is one of the three the
/// engine declares scalar fields with.
fn scalar_tag(name: &str) -> Option<&'static str> {
    match name {
        "String" | "str" => Some("String"),
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" | "f32" | "f64" => {
            Some("Number")
        }
        "bool" => Some("Boolean"),
        _ => None,
    }
}

/// Renders a field's declared [`nodeql_schema::FieldType`] from its Rust
/// return type: a known scalar primitive maps to the matching
/// [`nodeql_schema::ScalarTag`]; anything else is taken to name a
/// registered node type by its own Rust identifier, unless `override_name`
/// (from `#[field(returns = "...")]`) says otherwise — the escape hatch a
/// connection/edge wrapper field needs, since its Rust type (`ConnectionEntity`)
/// never matches the schema name it is registered under (`CommentConnection`).
pub fn declared_field_type(ty: &Type, override_name: Option<&str>) -> TokenStream {
    let bare = strip_option(strip_reference(ty));

    if let Some(name) = override_name {
        return quote! { nodeql_schema::FieldType::node(#name) };
    }

    match last_segment_ident(bare).as_deref().and_then(scalar_tag) {
        Some("String") => quote! { nodeql_schema::FieldType::Scalar(nodeql_schema::ScalarTag::String) },
        Some("Number") => quote! { nodeql_schema::FieldType::Scalar(nodeql_schema::ScalarTag::Number) },
        Some("Boolean") => quote! { nodeql_schema::FieldType::Scalar(nodeql_schema::ScalarTag::Boolean) },
        _ => {
            let name = last_segment_ident(bare).unwrap_or_else(|| "Unknown".to_owned());
            quote! { nodeql_schema::FieldType::node(#name) }
        }
    }
}

/// Renders the expression that extracts one positional call argument,
/// converting it to the parameter's Rust type. Only scalar argument types
/// are supported — the grammar only ever hands a resolver integer and
/// string literals.
pub fn argument_expr(ty: &Type, index: usize) -> TokenStream {
    let bare = strip_reference(ty);
    let name = last_segment_ident(bare).unwrap_or_default();

    match scalar_tag(&name) {
        Some("String") => quote! {
            arguments.get(#index).and_then(|literal| literal.as_str()).map(str::to_owned).unwrap_or_default()
        },
        Some("Boolean") => quote! {
            arguments.get(#index).and_then(|literal| literal.as_int()).map(|value| value != 0).unwrap_or_default()
        },
        _ => quote! {
            arguments.get(#index).and_then(|literal| literal.as_int()).unwrap_or_default() as #bare
        },
    }
}

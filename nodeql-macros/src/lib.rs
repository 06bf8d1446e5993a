//! Declarative field-DSL sugar for the `nodeql` query engine: the `#[node]`
//! attribute macro turns an `impl` block's methods into a node type's field
//! declarations, and `#[derive(NodeType)]` does the same for a plain
//! struct's named fields.
//!
//! Both expand to a `Type::node_type::<C>() -> NodeType<C>` associated
//! function; the caller still registers it explicitly with
//! `registry.register(Type::node_type())`, matching the rest of the engine's
//! preference for explicit registration over implicit discovery.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, AttributeArgs, Item, ItemStruct};

mod field;
mod field_type;
mod node;
mod struct_derive;

/// Attribute macro: `#[node] impl Post { fn title(&self) -> String { ... } }`.
///
/// ### Example
/// ```rust ignore
/// #[node]
/// impl Post {
///     fn title(&self) -> String {
///         self.title.clone()
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn node(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as AttributeArgs);
    let input = parse_macro_input!(item as Item);

    let item = match input {
        Item::Impl(item) => item,
        _ => return quote! { compile_error!("`#[node]` can only be applied to an `impl` block"); }.into(),
    };

    match node::expand(args, item) {
        Ok(result) => result.into(),
        Err(error) => quote! { compile_error!(#error); }.into(),
    }
}

/// Derive macro: `#[derive(NodeType)] struct Comment { id: i64, content: String }`.
#[proc_macro_derive(NodeType, attributes(field))]
pub fn node_type_derive(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);

    match struct_derive::expand(input) {
        Ok(result) => result.into(),
        Err(error) => quote! { compile_error!(#error); }.into(),
    }
}

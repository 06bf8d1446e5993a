//! `nodeql` ties together the crate family that makes up the query engine:
//! a compact call-chain query language parsed by `nodeql-core`, bound
//! against a [`SchemaRegistry`] of node types and root calls, and executed
//! into a nested [`Value`] result tree.
//!
//! The pieces are published as separate crates (`nodeql-core`,
//! `nodeql-schema`, `nodeql-node`, `nodeql-executor`, `nodeql-introspection`,
//! `nodeql-macros`) and re-exported here so a consumer only depends on
//! `nodeql` itself.

#![deny(missing_docs)]

use std::any::Any;
use std::sync::Arc;

pub use nodeql_core::{
    Error, FieldNotDefinedError, FragmentNotDefinedError, Fragment, ResolverError,
    RootCallNotFoundError, StructuralError, SyntaxError, TypeNotFoundError, Value,
};
pub use nodeql_core::{Call, Document, Entity, Intermediate, Literal, Selection};
pub use nodeql_executor::{execute, Executor, ExecutorOptions};
pub use nodeql_introspection as introspection;
pub use nodeql_macros::{node, NodeType as NodeTypeDerive};
pub use nodeql_node::{register_builtin_scalars, register_connection_type, ConnectionEntity, EdgeEntity, Node};
pub use nodeql_schema::{FieldDef, FieldType, IntoIntermediate, NodeType, NodeTypeBuilder, Resolver, RootCall, RootResolution, ScalarTag, SchemaRegistry};

#[cfg(test)]
mod tests;

/// A parsed, not-yet-executed query bound to a schema and a context.
///
/// Parsing happens in [`Query::new`]; execution is deferred until
/// [`Query::result`] or [`Query::as_result`] is called, so a caller can
/// inspect [`Query::fragments`] (or simply decide not to run the query)
/// without paying for a traversal.
pub struct Query<'a, C> {
    registry: &'a SchemaRegistry<C>,
    document: Document,
    context: C,
}

impl<'a, C> Query<'a, C> {
    /// Parses `text` against no schema yet — binding happens at
    /// execution time, field by field, as the executor walks the
    /// document. Returns a [`SyntaxError`] if `text` is not well-formed.
    pub fn new(registry: &'a SchemaRegistry<C>, text: &str, context: C) -> Result<Query<'a, C>, Error> {
        let document = nodeql_core::parse(text)?;
        Ok(Query { registry, document, context })
    }

    /// Executes the query and returns its result tree.
    pub fn result(&self) -> Result<Value, Error> {
        nodeql_executor::execute(self.registry, &self.document, &self.context)
    }

    /// Executes the query and converts its result tree into a
    /// `serde_json::Value`, for callers that want JSON directly rather
    /// than walking [`Value`] themselves.
    pub fn as_result(&self) -> Result<serde_json::Value, Error> {
        self.result().map(|value| serde_json::to_value(value).expect("Value always serializes"))
    }

    /// The fragment definitions that appeared alongside this query's root
    /// calls, keyed by their sigil-prefixed identifier.
    pub fn fragments(&self) -> impl Iterator<Item = (&str, &Fragment)> {
        self.document.fragments.iter().map(|(identifier, fragment)| (identifier.as_str(), fragment))
    }
}

/// Registers the distinguished `context` root call: a zero-argument entry
/// point that hands back the context handle itself, wrapped as the named
/// node type, so a query can read fields off it directly (e.g.
/// `context { currentUser { name } }`).
///
/// `type_name` must already be registered as a node type wrapping `C`.
pub fn register_context_call<C>(registry: &mut SchemaRegistry<C>, type_name: impl Into<String>)
where
    C: Clone + Any + Send + Sync,
{
    let type_name = type_name.into();
    registry.register_root_call(RootCall::new("context", Vec::new(), type_name, |_, context: &C| {
        Ok(RootResolution::One(Arc::new(context.clone()) as Entity))
    }));
}

#![deny(missing_docs)]

//! `nodeql-schema` is the registry of node types and root calls a query
//! executes against: the schema half of the engine, independent of any
//! particular traversal.

mod fields;
mod into_intermediate;
mod registry;
mod root_call;
mod ty;
mod types;

pub use fields::{FieldDef, Resolver};
pub use into_intermediate::IntoIntermediate;
pub use registry::SchemaRegistry;
pub use root_call::{RootCall, RootResolution};
pub use ty::{FieldType, ScalarTag};
pub use types::{NodeType, NodeTypeBuilder};

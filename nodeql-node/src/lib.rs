#![deny(missing_docs)]

//! `nodeql-node` is the node side of the engine: the `Node` wrapper the
//! executor drives a field call against, the built-in chainable scalar
//! types, and the connections convention (`count`/`any`/`edges` plus
//! cursor-based pagination) for collection-typed fields.

mod connection;
mod node;
mod scalar;

pub use connection::{register_connection_type, ConnectionEntity, EdgeEntity};
pub use node::Node;
pub use scalar::{register_builtin_scalars, scalar_type_name};

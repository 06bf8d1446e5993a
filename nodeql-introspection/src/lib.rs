#![deny(missing_docs)]

//! `nodeql-introspection` exposes a schema registry's own shape — its node
//! types, their fields, and its root calls — as a queryable node, reachable
//! through a distinguished `__schema` root call.
//!
//! The snapshot it describes is frozen at registration time, so calling
//! [`register`] after every domain type is registered is what keeps the
//! introspection types themselves out of their own description.

mod descriptor;
mod register;

pub use descriptor::{ArgumentDescriptor, FieldDescriptor, RootCallDescriptor, SchemaDescriptor, TypeDescriptor};
pub use register::register;

#![deny(missing_docs)]

//! `nodeql-core` contains the lexer, parser and value model shared by the
//! rest of the `nodeql` crate family: turning query text into a [`Document`]
//! AST, and the leaf [`Value`]/[`Literal`] types that flow through
//! resolution.
//!
//! This crate has no dependency on a schema, an executor, or any notion of
//! a node. It is purely syntax and value representation.

mod ast;
mod error;
mod intermediate;
mod lexer;
mod parser;
mod value;

pub use ast::{Call, Document, Fragment, Selection};
pub use error::{
    Error, FieldNotDefinedError, FragmentNotDefinedError, ResolverError, RootCallNotFoundError,
    StructuralError, SyntaxError, TypeNotFoundError,
};
pub use intermediate::{Entity, Intermediate};
pub use parser::parse;
pub use value::{Literal, Value};

#![deny(missing_docs)]

//! `nodeql-executor` walks a parsed [`Document`] against a [`SchemaRegistry`],
//! dispatching root calls, following field-level call chains, splicing in
//! fragments, and assembling the nested result [`Value`].
//!
//! Execution is synchronous: there is no suspension point in this crate.
//! Whatever blocking a resolver performs is between it and its caller.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;

use nodeql_core::{Call, Document, Entity, Error, FragmentNotDefinedError, Intermediate, Selection, StructuralError, Value};
use nodeql_node::{scalar_type_name, Node};
use nodeql_schema::{FieldType, SchemaRegistry};

/// Configuration accepted by [`Executor::new`].
#[derive(Clone, Copy, Debug)]
pub struct ExecutorOptions {
    /// Maximum selection-set nesting depth allowed before execution aborts
    /// with a [`StructuralError`]. `None` leaves depth unbounded.
    pub max_selection_depth: Option<usize>,
    /// Whether a root call that doesn't resolve against the registry is
    /// logged (`log::debug!`) before the `RootCallNotFound` error is
    /// returned.
    pub log_unknown_root_calls: bool,
}

impl Default for ExecutorOptions {
    fn default() -> ExecutorOptions {
        ExecutorOptions {
            max_selection_depth: None,
            log_unknown_root_calls: false,
        }
    }
}

/// Walks parsed documents against a registry under a fixed
/// [`ExecutorOptions`]. Stateless beyond its options; safe to reuse across
/// many `execute` calls.
pub struct Executor {
    options: ExecutorOptions,
}

impl Executor {
    /// Builds an executor bound to the given options.
    pub fn new(options: ExecutorOptions) -> Executor {
        Executor { options }
    }

    /// Executes a parsed document against a registry and a caller-supplied
    /// context, producing the nested result mapping.
    pub fn execute<C>(&self, registry: &SchemaRegistry<C>, document: &Document, context: &C) -> Result<Value, Error> {
        let mut result = IndexMap::new();

        for call in &document.root_calls {
            log::debug!("dispatching root call `{}`", call.identifier);

            let root_call = match registry.resolve_root(&call.identifier) {
                Ok(root_call) => root_call,
                Err(err) => {
                    if self.options.log_unknown_root_calls {
                        log::debug!("unknown root call `{}`", call.identifier);
                    }
                    return Err(err);
                }
            };
            let return_type = root_call.return_type().to_owned();
            let resolution = root_call.resolve(&call.arguments, context)?;
            let keyed_by_argument = !call.arguments.is_empty();

            for entity in resolution.into_entities() {
                let node = Node::new(registry, return_type.clone(), entity);

                let key = if keyed_by_argument {
                    identity_key(&node, context)?
                } else {
                    call.response_key().to_owned()
                };

                let value = continue_call(
                    registry,
                    FieldType::node(return_type.clone()),
                    Intermediate::shared_entity(node.entity().clone()),
                    call,
                    document,
                    context,
                    &self.options,
                    1,
                )?;

                result.insert(key, value);
            }
        }

        Ok(Value::Object(result))
    }
}

/// Executes a parsed document against a registry and a caller-supplied
/// context, producing the nested result mapping. A convenience wrapper
/// around [`Executor::new`] with default options.
pub fn execute<C>(registry: &SchemaRegistry<C>, document: &Document, context: &C) -> Result<Value, Error> {
    Executor::new(ExecutorOptions::default()).execute(registry, document, context)
}

/// Reads a node's conventional `id` field and stringifies it, per the
/// "typically the stringified primary id" root-result-key convention.
fn identity_key<C>(node: &Node<'_, C>, context: &C) -> Result<String, Error> {
    let (_, intermediate) = node.resolve_field("id", &[], context)?;
    match intermediate {
        Intermediate::Value(value) => Ok(stringify(&value)),
        Intermediate::Entity(_) | Intermediate::Collection(_) => Err(Error::Structural(StructuralError {
            type_name: node.node_type().to_owned(),
            field_name: "id".to_owned(),
            message: "the `id` field used to key a root result must resolve to a scalar".to_owned(),
        })),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(value) => value.clone(),
        Value::Int(value) => value.to_string(),
        Value::Float(value) => value.to_string(),
        Value::Bool(value) => value.to_string(),
        Value::Null => "null".to_owned(),
        Value::List(_) | Value::Object(_) => String::new(),
    }
}

/// Applies one field call (possibly the head of a chain) against a node
/// already bound to a type: looks the field up, resolves it, then hands the
/// result to [`continue_call`] to follow any remaining chain or
/// sub-selection.
fn apply_to_node<C>(
    registry: &SchemaRegistry<C>,
    node: &Node<'_, C>,
    call: &Call,
    document: &Document,
    context: &C,
    options: &ExecutorOptions,
    depth: usize,
) -> Result<Value, Error> {
    let (field_type, intermediate) = node.resolve_field(&call.identifier, &call.arguments, context)?;
    continue_call(registry, field_type, intermediate, call, document, context, options, depth)
}

/// Given the declared type and resolved value of a call, follows the rest of
/// its chain (or, at the tail, its sub-selections). Shared by root-call
/// dispatch and nested field resolution, since both produce the same
/// `(FieldType, Intermediate)` shape for a `Call`.
fn continue_call<C>(
    registry: &SchemaRegistry<C>,
    field_type: FieldType,
    intermediate: Intermediate,
    call: &Call,
    document: &Document,
    context: &C,
    options: &ExecutorOptions,
    depth: usize,
) -> Result<Value, Error> {
    match intermediate {
        Intermediate::Value(value) => match &call.chained_call {
            Some(next) => {
                let (type_name, entity) = wrap_scalar(&field_type, value)?;
                let node = Node::new(registry, type_name, entity);
                apply_to_node(registry, &node, next, document, context, options, depth)
            }
            None if !call.selections.is_empty() => Err(Error::Structural(StructuralError {
                type_name: String::new(),
                field_name: call.identifier.clone(),
                message: "a scalar result cannot carry a sub-selection".to_owned(),
            })),
            None => Ok(value),
        },
        Intermediate::Entity(entity) => {
            let node = Node::into_child(registry, &field_type, entity)?;

            match &call.chained_call {
                Some(next) => apply_to_node(registry, &node, next, document, context, options, depth),
                None if call.selections.is_empty() => Err(Error::Structural(StructuralError {
                    type_name: node.node_type().to_owned(),
                    field_name: call.identifier.clone(),
                    message: "a node result requires a sub-selection".to_owned(),
                })),
                None => evaluate_selection_set(registry, &node, &call.selections, document, context, options, depth)
                    .map(Value::Object),
            }
        }
        Intermediate::Collection(entities) => {
            if call.selections.is_empty() {
                let type_name = match &field_type {
                    FieldType::Node(name) => name.clone(),
                    FieldType::Scalar(_) => String::new(),
                };
                return Err(Error::Structural(StructuralError {
                    type_name,
                    field_name: call.identifier.clone(),
                    message: "a collection result requires a sub-selection".to_owned(),
                }));
            }

            let mut values = Vec::with_capacity(entities.len());
            for entity in entities {
                let node = Node::into_child(registry, &field_type, entity)?;
                values.push(Value::Object(evaluate_selection_set(
                    registry,
                    &node,
                    &call.selections,
                    document,
                    context,
                    options,
                    depth,
                )?));
            }
            Ok(Value::List(values))
        }
    }
}

/// Re-wraps a scalar leaf value as the entity of its built-in chainable
/// node type (e.g. a `String` so `.from(i)` can be resolved against it).
fn wrap_scalar(field_type: &FieldType, value: Value) -> Result<(String, Entity), Error> {
    let tag = match field_type {
        FieldType::Scalar(tag) => *tag,
        FieldType::Node(_) => {
            return Err(Error::Structural(StructuralError {
                type_name: String::new(),
                field_name: String::new(),
                message: "a chained call follows a node-typed field; scalar chaining only applies to scalar fields".to_owned(),
            }))
        }
    };

    let type_name = scalar_type_name(tag).to_owned();
    let entity: Entity = match value {
        Value::String(value) => Arc::new(value),
        Value::Int(value) => Arc::new(value),
        Value::Float(value) => Arc::new(value),
        Value::Bool(value) => Arc::new(value),
        Value::Null => Arc::new(()),
        Value::List(_) | Value::Object(_) => {
            return Err(Error::Structural(StructuralError {
                type_name: type_name.clone(),
                field_name: String::new(),
                message: "cannot chain a call off a list or object leaf value".to_owned(),
            }))
        }
    };

    Ok((type_name, entity))
}

/// Evaluates a selection set against a bound node, splicing in fragment
/// references in place and guarding against a fragment referencing itself
/// (directly or transitively).
fn evaluate_selection_set<C>(
    registry: &SchemaRegistry<C>,
    node: &Node<'_, C>,
    selections: &[Selection],
    document: &Document,
    context: &C,
    options: &ExecutorOptions,
    depth: usize,
) -> Result<IndexMap<String, Value>, Error> {
    if let Some(max_depth) = options.max_selection_depth {
        if depth > max_depth {
            return Err(Error::Structural(StructuralError {
                type_name: node.node_type().to_owned(),
                field_name: String::new(),
                message: format!("selection nesting exceeds the configured maximum of {max_depth}"),
            }));
        }
    }

    log::trace!("entering selection set on `{}` at depth {depth}", node.node_type());

    let mut result = IndexMap::new();
    let mut visited = HashSet::new();
    collect_selections(registry, node, selections, document, context, options, depth, &mut result, &mut visited)?;

    log::trace!("leaving selection set on `{}` at depth {depth}", node.node_type());

    Ok(result)
}

fn collect_selections<C>(
    registry: &SchemaRegistry<C>,
    node: &Node<'_, C>,
    selections: &[Selection],
    document: &Document,
    context: &C,
    options: &ExecutorOptions,
    depth: usize,
    result: &mut IndexMap<String, Value>,
    visited: &mut HashSet<String>,
) -> Result<(), Error> {
    for selection in selections {
        match selection {
            Selection::FieldSel(call) => {
                let value = apply_to_node(registry, node, call, document, context, options, depth + 1)?;
                result.insert(call.response_key().to_owned(), value);
            }
            Selection::FragmentRef(identifier) => {
                if !visited.insert(identifier.clone()) {
                    continue;
                }

                let fragment = document.fragments.get(identifier).ok_or_else(|| {
                    Error::FragmentNotDefined(FragmentNotDefinedError {
                        identifier: identifier.clone(),
                    })
                })?;

                collect_selections(registry, node, &fragment.fields, document, context, options, depth, result, visited)?;
            }
        }
    }

    Ok(())
}

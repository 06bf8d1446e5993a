use nodeql_core::{Entity, Error, Intermediate, Literal, StructuralError};
use nodeql_schema::{FieldType, SchemaRegistry};

/// A single target entity paired with the node type it's registered as and
/// the context it resolves against. This is the unit the executor drives a
/// `Call` against: look the field up on `node_type`, invoke its resolver
/// against `entity`, then decide whether the result needs wrapping in a new
/// `Node` (to recurse into sub-selections or continue a call chain) or is
/// already a terminal leaf.
pub struct Node<'a, C> {
    registry: &'a SchemaRegistry<C>,
    node_type: String,
    entity: Entity,
}

impl<'a, C> Node<'a, C> {
    /// Wraps an entity as an instance of the given registered node type.
    pub fn new(registry: &'a SchemaRegistry<C>, node_type: impl Into<String>, entity: Entity) -> Node<'a, C> {
        Node {
            registry,
            node_type: node_type.into(),
            entity,
        }
    }

    /// The node type this instance is registered as.
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// The wrapped entity.
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Resolves one field call against this node: looks the field up on
    /// `node_type` (walking its parent chain), then invokes its resolver
    /// against the wrapped entity and the call's arguments.
    ///
    /// Returns the field's declared type alongside the resolved value so
    /// the caller can check a scalar result isn't followed by a
    /// sub-selection, and a node result re-wraps into a new `Node` using
    /// the declared type, not whatever concrete type the resolver returned.
    pub fn resolve_field(
        &self,
        field_name: &str,
        arguments: &[Literal],
        context: &C,
    ) -> Result<(FieldType, Intermediate), Error> {
        let field = self.registry.resolve_field(&self.node_type, field_name)?;
        let declared_type = field.declared_type().clone();
        let value = field.resolve(self.entity.as_ref(), arguments, context)?;
        Ok((declared_type, value))
    }

    /// Re-wraps a resolved entity as a new `Node` of the given declared
    /// field type, erroring if the field was declared as a scalar but a
    /// sub-selection or chained field call was attempted against it.
    pub fn into_child(registry: &'a SchemaRegistry<C>, declared_type: &FieldType, entity: Entity) -> Result<Node<'a, C>, Error> {
        match declared_type {
            FieldType::Node(type_name) => Ok(Node::new(registry, type_name.clone(), entity)),
            FieldType::Scalar(_) => Err(Error::Structural(StructuralError {
                type_name: String::new(),
                field_name: String::new(),
                message: "a scalar field's result cannot carry a sub-selection or chained call".to_owned(),
            })),
        }
    }
}

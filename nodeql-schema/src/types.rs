use indexmap::IndexMap;

use super::fields::FieldDef;

/// A registered node type: a named bundle of fields that a query can
/// select against, optionally inheriting fields from a parent type and
/// optionally marked as a collection wrapper via `connection_for`.
pub struct NodeType<C> {
    schema_name: String,
    own_fields: IndexMap<String, FieldDef<C>>,
    parent: Option<String>,
    connection_for: Option<String>,
}

impl<C> NodeType<C> {
    /// The type's registered name.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// The name of the parent type this one inherits fields from, if any.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// If this type represents a collection/edge wrapper, the name of the
    /// element type it wraps.
    pub fn connection_for(&self) -> Option<&str> {
        self.connection_for.as_deref()
    }

    /// Looks up a field declared directly on this type (not walking the
    /// parent chain — that is the registry's job, since parents are
    /// resolved by name).
    pub fn own_field(&self, name: &str) -> Option<&FieldDef<C>> {
        self.own_fields.get(name)
    }

    /// Iterates this type's own fields, in declaration order.
    pub fn own_fields(&self) -> impl Iterator<Item = &FieldDef<C>> {
        self.own_fields.values()
    }
}

/// Fluent builder for a [`NodeType`], mirroring the way a schema-authoring
/// DSL reads: `NodeTypeBuilder::new("Post").field(...).field(...)`.
pub struct NodeTypeBuilder<C> {
    schema_name: String,
    own_fields: IndexMap<String, FieldDef<C>>,
    parent: Option<String>,
    connection_for: Option<String>,
}

impl<C> NodeTypeBuilder<C> {
    /// Starts building a node type with the given schema name.
    pub fn new(schema_name: impl Into<String>) -> NodeTypeBuilder<C> {
        NodeTypeBuilder {
            schema_name: schema_name.into(),
            own_fields: IndexMap::new(),
            parent: None,
            connection_for: None,
        }
    }

    /// Declares the parent type this one inherits fields from.
    pub fn parent(mut self, name: impl Into<String>) -> NodeTypeBuilder<C> {
        self.parent = Some(name.into());
        self
    }

    /// Marks this type as the collection wrapper for the named element
    /// type (the Connections convention).
    pub fn connection_for(mut self, element_type: impl Into<String>) -> NodeTypeBuilder<C> {
        self.connection_for = Some(element_type.into());
        self
    }

    /// Adds a field declaration. A later call with the same name replaces
    /// an earlier one, matching first-match-wins override semantics for a
    /// type overriding its own declarations.
    pub fn field(mut self, field: FieldDef<C>) -> NodeTypeBuilder<C> {
        self.own_fields.insert(field.name().to_owned(), field);
        self
    }

    /// Finishes the declaration.
    pub fn build(self) -> NodeType<C> {
        NodeType {
            schema_name: self.schema_name,
            own_fields: self.own_fields,
            parent: self.parent,
            connection_for: self.connection_for,
        }
    }
}

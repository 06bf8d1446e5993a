use std::collections::HashMap;

use nodeql_core::{Error, FieldNotDefinedError, RootCallNotFoundError, StructuralError, TypeNotFoundError};

use super::fields::FieldDef;
use super::root_call::RootCall;
use super::types::NodeType;

/// The schema: every registered node type and root call, read-only once a
/// query starts executing (registration is expected to complete first).
pub struct SchemaRegistry<C> {
    node_types: HashMap<String, NodeType<C>>,
    root_calls: HashMap<String, RootCall<C>>,
}

impl<C> SchemaRegistry<C> {
    /// An empty registry, ready for registration calls.
    pub fn new() -> SchemaRegistry<C> {
        SchemaRegistry {
            node_types: HashMap::new(),
            root_calls: HashMap::new(),
        }
    }

    /// Registers a node type. Fails if a type of the same name is already
    /// registered.
    pub fn register(&mut self, node_type: NodeType<C>) -> Result<(), Error> {
        let name = node_type.schema_name().to_owned();
        if self.node_types.contains_key(&name) {
            return Err(Error::Structural(StructuralError {
                type_name: name.clone(),
                field_name: String::new(),
                message: format!("type `{name}` is already registered"),
            }));
        }
        self.node_types.insert(name, node_type);
        Ok(())
    }

    /// Retrieves a node type by name.
    pub fn lookup(&self, name: &str) -> Result<&NodeType<C>, Error> {
        self.node_types.get(name).ok_or_else(|| {
            Error::TypeNotFound(TypeNotFoundError {
                type_name: name.to_owned(),
            })
        })
    }

    /// Registers a root call, keyed by its own name.
    pub fn register_root_call(&mut self, root_call: RootCall<C>) {
        self.root_calls
            .insert(root_call.schema_name().to_owned(), root_call);
    }

    /// Retrieves a root call by name.
    pub fn resolve_root(&self, name: &str) -> Result<&RootCall<C>, Error> {
        self.root_calls.get(name).ok_or_else(|| {
            Error::RootCallNotFound(RootCallNotFoundError {
                identifier: name.to_owned(),
            })
        })
    }

    /// Iterates every registered node type. Used by introspection.
    pub fn node_types(&self) -> impl Iterator<Item = &NodeType<C>> {
        self.node_types.values()
    }

    /// Iterates every registered root call. Used by introspection.
    pub fn root_calls(&self) -> impl Iterator<Item = &RootCall<C>> {
        self.root_calls.values()
    }

    /// Resolves a field by name against a node type, walking the parent
    /// chain when the type itself doesn't declare it. First match wins,
    /// so a child type's own declaration shadows an inherited one with the
    /// same name.
    pub fn resolve_field(&self, type_name: &str, field_name: &str) -> Result<&FieldDef<C>, Error> {
        let mut current = self.lookup(type_name)?;

        loop {
            if let Some(field) = current.own_field(field_name) {
                return Ok(field);
            }

            match current.parent() {
                Some(parent_name) => current = self.lookup(parent_name)?,
                None => {
                    log::debug!("field `{field_name}` not defined on `{type_name}` or any of its parents");
                    return Err(Error::FieldNotDefined(FieldNotDefinedError {
                        type_name: type_name.to_owned(),
                        field_name: field_name.to_owned(),
                    }))
                }
            }
        }
    }
}

impl<C> Default for SchemaRegistry<C> {
    fn default() -> SchemaRegistry<C> {
        SchemaRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use nodeql_core::Intermediate;

    use super::super::fields::FieldDef;
    use super::super::ty::{FieldType, ScalarTag};
    use super::super::types::NodeTypeBuilder;
    use super::*;

    fn string_field<C>(name: &str) -> FieldDef<C> {
        FieldDef::new(name, FieldType::Scalar(ScalarTag::String), |_, _, _| {
            Ok(Intermediate::value("stub"))
        })
    }

    #[test]
    fn resolves_a_field_declared_directly_on_the_type() {
        let mut registry: SchemaRegistry<()> = SchemaRegistry::new();
        registry
            .register(NodeTypeBuilder::new("Post").field(string_field("title")).build())
            .unwrap();

        assert!(registry.resolve_field("Post", "title").is_ok());
    }

    #[test]
    fn walks_the_parent_chain_for_inherited_fields() {
        let mut registry: SchemaRegistry<()> = SchemaRegistry::new();
        registry
            .register(NodeTypeBuilder::new("Entry").field(string_field("id")).build())
            .unwrap();
        registry
            .register(
                NodeTypeBuilder::new("Post")
                    .parent("Entry")
                    .field(string_field("title"))
                    .build(),
            )
            .unwrap();

        assert!(registry.resolve_field("Post", "id").is_ok());
        assert!(registry.resolve_field("Post", "title").is_ok());
    }

    #[test]
    fn a_child_field_overrides_a_parent_field_of_the_same_name() {
        let mut registry: SchemaRegistry<()> = SchemaRegistry::new();
        registry
            .register(NodeTypeBuilder::new("Entry").field(string_field("label")).build())
            .unwrap();
        registry
            .register(
                NodeTypeBuilder::new("Post")
                    .parent("Entry")
                    .field(string_field("label"))
                    .build(),
            )
            .unwrap();

        // Both registrations exist; resolution must find the child's own
        // declaration first without erroring on the duplicate name.
        assert!(registry.resolve_field("Post", "label").is_ok());
    }

    #[test]
    fn unknown_field_is_a_field_not_defined_error() {
        let mut registry: SchemaRegistry<()> = SchemaRegistry::new();
        registry.register(NodeTypeBuilder::new("Post").build()).unwrap();

        match registry.resolve_field("Post", "missing") {
            Err(Error::FieldNotDefined(err)) => {
                assert_eq!(err.type_name, "Post");
                assert_eq!(err.field_name, "missing");
            }
            other => panic!("expected FieldNotDefinedError, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_a_type_not_found_error() {
        let registry: SchemaRegistry<()> = SchemaRegistry::new();
        assert!(matches!(registry.lookup("Ghost"), Err(Error::TypeNotFound(_))));
    }

    #[test]
    fn unknown_root_call_is_a_root_call_not_found_error() {
        let registry: SchemaRegistry<()> = SchemaRegistry::new();
        assert!(matches!(
            registry.resolve_root("post"),
            Err(Error::RootCallNotFound(_))
        ));
    }
}

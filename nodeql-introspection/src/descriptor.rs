use nodeql_schema::{FieldType, ScalarTag};

/// Human-readable rendering of a declared field/argument type: the scalar
/// tag's lowercase name, or a node type's own schema name.
pub fn describe_type(declared_type: &FieldType) -> String {
    match declared_type {
        FieldType::Scalar(ScalarTag::String) => "string".to_owned(),
        FieldType::Scalar(ScalarTag::Number) => "number".to_owned(),
        FieldType::Scalar(ScalarTag::Boolean) => "boolean".to_owned(),
        FieldType::Node(name) => name.clone(),
    }
}

/// One field declared on a [`nodeql_schema::NodeType`].
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// The field's name.
    pub name: String,
    /// The field's declared type, rendered via [`describe_type`].
    pub declared_type: String,
    /// The field's attached description, if any.
    pub description: Option<String>,
}

/// One registered node type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// The type's registered name.
    pub name: String,
    /// The type's own (non-inherited) fields.
    pub fields: Vec<FieldDescriptor>,
    /// The parent type this one inherits fields from, if any.
    pub parent: Option<String>,
    /// The element type this type is a collection wrapper for, if any.
    pub connection_for: Option<String>,
}

/// One declared argument of a [`nodeql_schema::RootCall`].
#[derive(Debug, Clone)]
pub struct ArgumentDescriptor {
    /// The argument's name.
    pub name: String,
    /// The argument's declared type, rendered via [`describe_type`].
    pub declared_type: String,
}

/// One registered root call.
#[derive(Debug, Clone)]
pub struct RootCallDescriptor {
    /// The root call's registered name.
    pub name: String,
    /// The root call's declared arguments, in declaration order.
    pub arguments: Vec<ArgumentDescriptor>,
    /// The node type this root call's results are wrapped as.
    pub return_type: String,
}

/// A point-in-time snapshot of every node type and root call registered on a
/// [`nodeql_schema::SchemaRegistry`], taken before the introspection types
/// themselves are registered so the schema doesn't describe itself.
#[derive(Debug, Clone, Default)]
pub struct SchemaDescriptor {
    /// Every registered node type.
    pub types: Vec<TypeDescriptor>,
    /// Every registered root call.
    pub root_calls: Vec<RootCallDescriptor>,
}

impl SchemaDescriptor {
    /// Captures the current state of a registry.
    pub fn snapshot<C>(registry: &nodeql_schema::SchemaRegistry<C>) -> SchemaDescriptor {
        let types = registry
            .node_types()
            .map(|node_type| TypeDescriptor {
                name: node_type.schema_name().to_owned(),
                fields: node_type
                    .own_fields()
                    .map(|field| FieldDescriptor {
                        name: field.name().to_owned(),
                        declared_type: describe_type(field.declared_type()),
                        description: field.description_text().map(str::to_owned),
                    })
                    .collect(),
                parent: node_type.parent().map(str::to_owned),
                connection_for: node_type.connection_for().map(str::to_owned),
            })
            .collect();

        let root_calls = registry
            .root_calls()
            .map(|root_call| RootCallDescriptor {
                name: root_call.schema_name().to_owned(),
                arguments: root_call
                    .argument_declarations()
                    .iter()
                    .map(|(name, declared_type)| ArgumentDescriptor {
                        name: name.clone(),
                        declared_type: describe_type(declared_type),
                    })
                    .collect(),
                return_type: root_call.return_type().to_owned(),
            })
            .collect();

        SchemaDescriptor { types, root_calls }
    }
}

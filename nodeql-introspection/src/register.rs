use nodeql_core::{Error, Intermediate};
use nodeql_schema::{FieldDef, FieldType, NodeTypeBuilder, RootCall, RootResolution, SchemaRegistry, ScalarTag};

use super::descriptor::{ArgumentDescriptor, FieldDescriptor, RootCallDescriptor, SchemaDescriptor, TypeDescriptor};

fn string_field<C>(name: &'static str, get: impl Fn(&dyn std::any::Any) -> String + Send + Sync + 'static) -> FieldDef<C> {
    FieldDef::new(name, FieldType::Scalar(ScalarTag::String), move |target, _, _| {
        Ok(Intermediate::value(get(target)))
    })
}

fn optional_string_field<C>(
    name: &'static str,
    get: impl Fn(&dyn std::any::Any) -> Option<String> + Send + Sync + 'static,
) -> FieldDef<C> {
    FieldDef::new(name, FieldType::Scalar(ScalarTag::String), move |target, _, _| {
        Ok(Intermediate::value(get(target).unwrap_or_default()))
    })
}

/// Registers the introspection node types (`IntrospectionField`,
/// `IntrospectionArgument`, `IntrospectionType`, `IntrospectionRootCall`,
/// `IntrospectionSchema`) and the `__schema` root call against a registry.
///
/// Must run after every domain type and root call is registered: the
/// snapshot it captures is frozen at the moment this function runs, so the
/// schema it describes doesn't end up describing its own introspection
/// types.
pub fn register<C: 'static>(registry: &mut SchemaRegistry<C>) -> Result<(), Error> {
    let snapshot = SchemaDescriptor::snapshot(registry);

    registry.register(
        NodeTypeBuilder::new("IntrospectionArgument")
            .field(string_field("name", |target| {
                target.downcast_ref::<ArgumentDescriptor>().unwrap().name.clone()
            }))
            .field(string_field("type", |target| {
                target.downcast_ref::<ArgumentDescriptor>().unwrap().declared_type.clone()
            }))
            .build(),
    )?;

    registry.register(
        NodeTypeBuilder::new("IntrospectionField")
            .field(string_field("name", |target| {
                target.downcast_ref::<FieldDescriptor>().unwrap().name.clone()
            }))
            .field(string_field("type", |target| {
                target.downcast_ref::<FieldDescriptor>().unwrap().declared_type.clone()
            }))
            .field(optional_string_field("description", |target| {
                target.downcast_ref::<FieldDescriptor>().unwrap().description.clone()
            }))
            .build(),
    )?;

    registry.register(
        NodeTypeBuilder::new("IntrospectionType")
            .field(string_field("name", |target| {
                target.downcast_ref::<TypeDescriptor>().unwrap().name.clone()
            }))
            .field(optional_string_field("parent", |target| {
                target.downcast_ref::<TypeDescriptor>().unwrap().parent.clone()
            }))
            .field(optional_string_field("connectionFor", |target| {
                target.downcast_ref::<TypeDescriptor>().unwrap().connection_for.clone()
            }))
            .field(FieldDef::new(
                "fields",
                FieldType::node("IntrospectionField"),
                |target, _, _| {
                    let descriptor = target.downcast_ref::<TypeDescriptor>().unwrap();
                    Ok(Intermediate::collection(descriptor.fields.clone()))
                },
            ))
            .build(),
    )?;

    registry.register(
        NodeTypeBuilder::new("IntrospectionRootCall")
            .field(string_field("name", |target| {
                target.downcast_ref::<RootCallDescriptor>().unwrap().name.clone()
            }))
            .field(string_field("returnType", |target| {
                target.downcast_ref::<RootCallDescriptor>().unwrap().return_type.clone()
            }))
            .field(FieldDef::new(
                "arguments",
                FieldType::node("IntrospectionArgument"),
                |target, _, _| {
                    let descriptor = target.downcast_ref::<RootCallDescriptor>().unwrap();
                    Ok(Intermediate::collection(descriptor.arguments.clone()))
                },
            ))
            .build(),
    )?;

    registry.register(
        NodeTypeBuilder::new("IntrospectionSchema")
            .field(FieldDef::new(
                "types",
                FieldType::node("IntrospectionType"),
                |target, _, _| {
                    let descriptor = target.downcast_ref::<SchemaDescriptor>().unwrap();
                    Ok(Intermediate::collection(descriptor.types.clone()))
                },
            ))
            .field(FieldDef::new(
                "rootCalls",
                FieldType::node("IntrospectionRootCall"),
                |target, _, _| {
                    let descriptor = target.downcast_ref::<SchemaDescriptor>().unwrap();
                    Ok(Intermediate::collection(descriptor.root_calls.clone()))
                },
            ))
            .build(),
    )?;

    registry.register_root_call(RootCall::new(
        "__schema",
        Vec::new(),
        "IntrospectionSchema",
        move |_, _| Ok(RootResolution::one(snapshot.clone())),
    ));

    Ok(())
}

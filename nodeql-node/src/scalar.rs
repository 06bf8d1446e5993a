use nodeql_core::{Error, Intermediate};
use nodeql_schema::{FieldDef, FieldType, NodeTypeBuilder, ScalarTag, SchemaRegistry};

/// The name of the built-in node type that wraps a leaf value of the given
/// scalar tag for further chaining (e.g. a string's `from(i).for(n)`).
pub fn scalar_type_name(tag: ScalarTag) -> &'static str {
    match tag {
        ScalarTag::String => "String",
        ScalarTag::Number => "Number",
        ScalarTag::Boolean => "Boolean",
    }
}

/// Registers the chainable operations on leaf scalar values. Only `String`
/// currently has any: `from(i)` drops the first `i` characters, `for(n)`
/// keeps the first `n` of whatever remains.
pub fn register_builtin_scalars<C: 'static>(registry: &mut SchemaRegistry<C>) -> Result<(), Error> {
    registry.register(
        NodeTypeBuilder::new(scalar_type_name(ScalarTag::String))
            .field(FieldDef::new("from", FieldType::Scalar(ScalarTag::String), |target, arguments, _| {
                let string = target
                    .downcast_ref::<String>()
                    .expect("String node type always wraps a String");
                let skip = arguments.first().and_then(|literal| literal.as_int()).unwrap_or(0).max(0);
                let rest: String = string.chars().skip(skip as usize).collect();
                Ok(Intermediate::value(rest))
            }))
            .field(FieldDef::new("for", FieldType::Scalar(ScalarTag::String), |target, arguments, _| {
                let string = target
                    .downcast_ref::<String>()
                    .expect("String node type always wraps a String");
                let take = arguments.first().and_then(|literal| literal.as_int()).unwrap_or(0).max(0);
                let prefix: String = string.chars().take(take as usize).collect();
                Ok(Intermediate::value(prefix))
            }))
            .build(),
    )
}

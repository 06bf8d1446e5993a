use nodeql_core::{Intermediate, Value};

/// Converts a field resolver's plain Rust return value into the
/// [`Intermediate`] the executor expects, so `nodeql-macros`-generated
/// resolvers can write `this.method(...)` instead of hand-wrapping every
/// result.
///
/// Built-in scalars convert to [`Intermediate::Value`]; a type registered
/// as a node (by hand or via `#[node]`) converts to [`Intermediate::Entity`]
/// by being moved behind a fresh `Arc`.
pub trait IntoIntermediate {
    /// Wraps `self` as the field's resolved value.
    fn into_intermediate(self) -> Intermediate;
}

macro_rules! scalar_into_intermediate {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoIntermediate for $ty {
                fn into_intermediate(self) -> Intermediate {
                    Intermediate::Value(Value::from(self))
                }
            }
        )*
    };
}

scalar_into_intermediate!(String, bool, i64, f64, usize);

impl IntoIntermediate for &str {
    fn into_intermediate(self) -> Intermediate {
        Intermediate::Value(Value::from(self))
    }
}

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// A literal that can appear in a call's argument list. The grammar only
/// allows integers and quoted strings (see `literal` in the EBNF), so this
/// is deliberately narrower than [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// An integer literal, e.g. the `123` in `post(123)`.
    Int(i64),

    /// A quoted string literal, e.g. the `"cursor"` in `after("cursor")`.
    Str(String),
}

impl Literal {
    /// Returns the integer value of this literal, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(value) => Some(*value),
            Literal::Str(_) => None,
        }
    }

    /// Returns the string value of this literal, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(value) => Some(value),
            Literal::Int(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Str(value) => write!(f, "{value}"),
        }
    }
}

/// A leaf (or nested) value in the result tree. Field resolvers hand these
/// back wrapped in [`crate::Intermediate::Value`]; the executor assembles
/// them into the final [`Value::Object`] per selection set.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value.
    Null,

    /// A boolean scalar.
    Bool(bool),

    /// An integer scalar.
    Int(i64),

    /// A floating point scalar.
    Float(f64),

    /// A string scalar.
    String(String),

    /// A list of values, e.g. the materialized edges of a connection.
    List(Vec<Value>),

    /// An ordered mapping of field names to values. This is the shape of
    /// every selection set's result.
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Returns the string value, if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Int(value) => Value::Int(value),
            Literal::Str(value) => Value::String(value),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(value: IndexMap<String, Value>) -> Self {
        Value::Object(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::List(values) => values.serialize(serializer),
            Value::Object(map) => map.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_an_object_preserving_insertion_order() {
        let mut fields = IndexMap::new();
        fields.insert("title".to_owned(), Value::from("My great post"));
        fields.insert("published".to_owned(), Value::from(true));

        let value = Value::Object(fields);
        let json = serde_json::to_value(&value).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"title": "My great post", "published": true})
        );
    }

    #[test]
    fn null_serializes_to_json_null() {
        assert_eq!(serde_json::to_value(Value::Null).unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn literal_converts_into_its_matching_value_variant() {
        assert_eq!(Value::from(Literal::Int(123)), Value::Int(123));
        assert_eq!(
            Value::from(Literal::Str("cursor".to_owned())),
            Value::String("cursor".to_owned())
        );
    }

    #[test]
    fn option_and_vec_conversions_compose() {
        let value: Value = vec![Some(1_i64), None, Some(3_i64)].into();
        assert_eq!(
            value,
            Value::List(vec![Value::Int(1), Value::Null, Value::Int(3)])
        );
    }
}

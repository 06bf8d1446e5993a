use std::any::Any;
use std::sync::Arc;

use nodeql_core::{Error, Intermediate, Literal};

use super::ty::FieldType;

/// A field's resolver: given the wrapped target entity, the call's
/// positional arguments, and the caller's context, produces the field's
/// value.
///
/// Bound as an explicit callable at registration time rather than
/// dispatched through a trait, so an unknown field is a registry lookup
/// miss instead of a runtime downcast failure.
pub type Resolver<C> = Arc<dyn Fn(&dyn Any, &[Literal], &C) -> Result<Intermediate, Error> + Send + Sync>;

/// A single field declared on a [`crate::NodeType`].
#[derive(Clone)]
pub struct FieldDef<C> {
    name: String,
    declared_type: FieldType,
    description: Option<String>,
    resolver: Resolver<C>,
}

impl<C> FieldDef<C> {
    /// Declares a field with the given name, type, and resolver.
    pub fn new<F>(name: impl Into<String>, declared_type: FieldType, resolver: F) -> FieldDef<C>
    where
        F: Fn(&dyn Any, &[Literal], &C) -> Result<Intermediate, Error> + Send + Sync + 'static,
    {
        FieldDef {
            name: name.into(),
            declared_type,
            description: None,
            resolver: Arc::new(resolver),
        }
    }

    /// Attaches a human-readable description, surfaced through
    /// introspection.
    pub fn description(mut self, description: impl Into<String>) -> FieldDef<C> {
        self.description = Some(description.into());
        self
    }

    /// The field's own name, as it appears in selections.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's declared type.
    pub fn declared_type(&self) -> &FieldType {
        &self.declared_type
    }

    /// The field's description, if one was attached.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Invokes the field's resolver against a wrapped target and a call's
    /// arguments.
    pub fn resolve(&self, target: &dyn Any, arguments: &[Literal], context: &C) -> Result<Intermediate, Error> {
        (self.resolver)(target, arguments, context)
    }
}

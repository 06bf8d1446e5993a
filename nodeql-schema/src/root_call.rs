use std::any::Any;
use std::sync::Arc;

use nodeql_core::{Entity, Error, Literal};

use super::ty::FieldType;

/// What a root call's resolver produces: a single target entity, bound to
/// the root call's declared return type, or a sequence of them (when the
/// call enumerates multiple identifiers, e.g. `comment(444, 445)`).
pub enum RootResolution {
    /// A single entity.
    One(Entity),
    /// Several entities, resolved and reported in this order.
    Many(Vec<Entity>),
}

impl RootResolution {
    /// Wraps a single concrete entity.
    pub fn one<T: Any + Send + Sync>(entity: T) -> RootResolution {
        RootResolution::One(Arc::new(entity))
    }

    /// Wraps a sequence of concrete entities.
    pub fn many<T: Any + Send + Sync>(entities: Vec<T>) -> RootResolution {
        RootResolution::Many(entities.into_iter().map(|e| Arc::new(e) as Entity).collect())
    }

    /// Produces the sequence form, treating `One` as a single-element
    /// list. Used by the executor so root-call dispatch has one shape to
    /// iterate over.
    pub fn into_entities(self) -> Vec<Entity> {
        match self {
            RootResolution::One(entity) => vec![entity],
            RootResolution::Many(entities) => entities,
        }
    }
}

type RootResolver<C> = Arc<dyn Fn(&[Literal], &C) -> Result<RootResolution, Error> + Send + Sync>;

/// A top-level query entry point, e.g. `post`, `comment`, `context`.
#[derive(Clone)]
pub struct RootCall<C> {
    schema_name: String,
    argument_declarations: Vec<(String, FieldType)>,
    return_type: String,
    resolver: RootResolver<C>,
}

impl<C> RootCall<C> {
    /// Declares a root call with the given name, argument shape, return
    /// node type, and resolver.
    pub fn new<F>(
        schema_name: impl Into<String>,
        argument_declarations: Vec<(String, FieldType)>,
        return_type: impl Into<String>,
        resolver: F,
    ) -> RootCall<C>
    where
        F: Fn(&[Literal], &C) -> Result<RootResolution, Error> + Send + Sync + 'static,
    {
        RootCall {
            schema_name: schema_name.into(),
            argument_declarations,
            return_type: return_type.into(),
            resolver: Arc::new(resolver),
        }
    }

    /// The root call's registered name.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// The root call's declared argument names and types.
    pub fn argument_declarations(&self) -> &[(String, FieldType)] {
        &self.argument_declarations
    }

    /// The node type this root call's results are wrapped as.
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    /// Invokes the root call's resolver.
    pub fn resolve(&self, arguments: &[Literal], context: &C) -> Result<RootResolution, Error> {
        (self.resolver)(arguments, context)
    }
}

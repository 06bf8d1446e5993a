use std::any::Any;
use std::sync::Arc;

use super::Value;

/// A shared domain object flowing through the executor between resolution
/// frames. The engine never inspects its contents; it only hands it back to
/// the [`crate::FieldDef`]-registered resolver that produced it, or passes
/// it along to a chained call's resolver.
///
/// `Arc` rather than `Box`: an edge's `node` field needs to hand back the
/// same entity its `Connection` wrapper already holds, without the
/// resolver owning it outright (resolvers only ever see `&dyn Any`).
/// Cloning the `Arc` is how that handoff happens without a real copy.
pub type Entity = Arc<dyn Any + Send + Sync>;

/// What a field resolver (or root call resolver) hands back to the
/// executor, before the executor decides how to continue resolving a
/// selection set against it.
pub enum Intermediate {
    /// A terminal leaf value — no further selection is permitted beneath
    /// it (see the scalar-with-subselection structural error).
    Value(Value),

    /// A single entity that a selection set can be applied to.
    Entity(Entity),

    /// A list of entities, each of which the same selection set is applied
    /// to independently.
    Collection(Vec<Entity>),
}

impl Intermediate {
    /// Shorthand for wrapping anything that converts into a [`Value`].
    pub fn value(value: impl Into<Value>) -> Intermediate {
        Intermediate::Value(value.into())
    }

    /// Shorthand for wrapping a concrete entity.
    pub fn entity<T: Any + Send + Sync>(entity: T) -> Intermediate {
        Intermediate::Entity(Arc::new(entity))
    }

    /// Wraps an entity that is already behind an `Arc`, without doing a
    /// fresh allocation — used when re-handing-out an entity a connection
    /// or edge already owns.
    pub fn shared_entity(entity: Entity) -> Intermediate {
        Intermediate::Entity(entity)
    }

    /// Shorthand for wrapping a collection of concrete entities.
    pub fn collection<T: Any + Send + Sync>(entities: Vec<T>) -> Intermediate {
        Intermediate::Collection(
            entities
                .into_iter()
                .map(|entity| Arc::new(entity) as Entity)
                .collect(),
        )
    }

    /// True if this intermediate carries no further structure to select
    /// into (a [`Value`]).
    pub fn is_leaf(&self) -> bool {
        matches!(self, Intermediate::Value(_))
    }
}

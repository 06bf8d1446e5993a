use std::collections::HashMap;

use super::Literal;

/// One full parsed query document: an ordered sequence of root calls plus
/// the fragment definitions that appeared alongside them.
///
/// Fragments are *not* inlined at parse time; they are spliced in lazily
/// during execution, against whatever node type happens to be current.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Root-level calls, in source order.
    pub root_calls: Vec<Call>,

    /// Fragment definitions, keyed by their sigil-prefixed identifier
    /// (e.g. `"$summary"`).
    pub fragments: HashMap<String, Fragment>,
}

/// A single call: a root call (`post(123)`) or a field-level call
/// (`first(1)`, `from(3)`). Calls chain via `chained_call` to model
/// `a.b(args).c(args)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The call's identifier, e.g. `post`, `comments`, `first`.
    pub identifier: String,

    /// Positional scalar arguments.
    pub arguments: Vec<Literal>,

    /// Sub-selections, attached to the *last* call in a chain (the grammar's
    /// trailing `{ selection_list }` applies to whatever the chain resolves
    /// to). Empty for leaf calls.
    pub selections: Vec<Selection>,

    /// The `as NAME` alias, attached to the *first* call in a chain (the
    /// alias renames the whole chain's result key).
    pub alias: Option<String>,

    /// The next call in a `a.b(...)` chain, if any.
    pub chained_call: Option<Box<Call>>,
}

impl Call {
    /// Returns a new leaf call with no arguments, selections, alias or
    /// chained call.
    pub fn new(identifier: impl Into<String>) -> Call {
        Call {
            identifier: identifier.into(),
            arguments: Vec::new(),
            selections: Vec::new(),
            alias: None,
            chained_call: None,
        }
    }

    /// The key this call's result should be recorded under: the alias if
    /// present, otherwise the call's own identifier.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.identifier)
    }

    /// The last call in the `a.b.c(...)` chain headed by this call. This is
    /// the call whose resolved value the selection set (if any) applies to.
    pub fn tail(&self) -> &Call {
        match &self.chained_call {
            Some(next) => next.tail(),
            None => self,
        }
    }

    /// Mutable variant of [`Call::tail`].
    pub fn tail_mut(&mut self) -> &mut Call {
        if self.chained_call.is_some() {
            self.chained_call.as_mut().unwrap().tail_mut()
        } else {
            self
        }
    }
}

/// A single entry in a selection set: either a field (possibly with a call
/// chain and sub-selections) or a reference to a fragment.
///
/// Either variant may carry nested structure via a `Call`'s own
/// sub-selections.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A field selection, e.g. `title` or `comments.first(1) { ... }`.
    FieldSel(Call),

    /// A reference to a fragment, e.g. `$summary`.
    FragmentRef(String),
}

/// A named, reusable selection set.
///
/// Fragment identifiers are unique within a query; this is enforced by
/// storing fragments in a `HashMap` keyed by identifier, so a duplicate
/// definition silently replaces the earlier one.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// The fragment's sigil-prefixed identifier, e.g. `"$summary"`.
    pub identifier: String,

    /// The selections this fragment expands to when referenced.
    pub fields: Vec<Selection>,
}

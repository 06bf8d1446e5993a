/// The scalar tags a field or argument may declare, per the engine's three
/// built-in scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarTag {
    /// A UTF-8 string scalar.
    String,
    /// A numeric scalar (integer or float, resolver's choice).
    Number,
    /// A boolean scalar.
    Boolean,
}

/// What a [`crate::FieldDef`] or a root call argument declares as its
/// type: either a scalar tag, or a late-bound reference to a node type by
/// name.
///
/// Node type references are by name rather than a direct pointer so that
/// mutually-referential schemas (e.g. a post that lists comments, each
/// comment pointing back to its post) don't require an initialization
/// cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A terminal scalar value.
    Scalar(ScalarTag),
    /// A reference to a registered node type, by its schema name.
    Node(String),
}

impl FieldType {
    /// Shorthand for [`FieldType::Node`].
    pub fn node(name: impl Into<String>) -> FieldType {
        FieldType::Node(name.into())
    }
}

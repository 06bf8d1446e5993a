use std::error::Error as StdError;
use std::fmt;

/// A lexical or grammatical failure while parsing query text. Unrecoverable:
/// execution never begins once one of these is raised.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    /// 1-based line the error was detected on.
    pub line: usize,

    /// 1-based column the error was detected on.
    pub column: usize,

    /// A short excerpt of the offending source, bounded to the surrounding
    /// line so large documents don't flood error output.
    pub text_snippet: String,

    /// Human-readable description of what was expected.
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "syntax error at {}:{}: {} (near `{}`)",
            self.line, self.column, self.message, self.text_snippet
        )
    }
}

impl StdError for SyntaxError {}

/// A selection names a field that is not declared on the node type it is
/// selected against, including its inherited fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNotDefinedError {
    /// The node type the field was looked up on.
    pub type_name: String,
    /// The field name that had no match.
    pub field_name: String,
}

impl fmt::Display for FieldNotDefinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field `{}` is not defined on type `{}`",
            self.field_name, self.type_name
        )
    }
}

impl StdError for FieldNotDefinedError {}

/// A query references a fragment identifier that has no matching
/// definition in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentNotDefinedError {
    /// The referenced, undefined fragment identifier (sigil included).
    pub identifier: String,
}

impl fmt::Display for FragmentNotDefinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fragment `{}` is not defined", self.identifier)
    }
}

impl StdError for FragmentNotDefinedError {}

/// A schema-internal reference (a field's declared type, a connection
/// pairing) names a node type that was never registered.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNotFoundError {
    /// The unregistered type name that was looked up.
    pub type_name: String,
}

impl fmt::Display for TypeNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type `{}` is not registered", self.type_name)
    }
}

impl StdError for TypeNotFoundError {}

/// A query's root call has no matching [`crate::RootCall`] registration.
#[derive(Debug, Clone, PartialEq)]
pub struct RootCallNotFoundError {
    /// The root call identifier that had no registration.
    pub identifier: String,
}

impl fmt::Display for RootCallNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no root call named `{}`", self.identifier)
    }
}

impl StdError for RootCallNotFoundError {}

/// A selection's shape conflicts with what the resolved value actually is:
/// a sub-selection against a scalar, or a leaf field with no sub-selection
/// against a node.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralError {
    /// The node type the offending field was resolved against.
    pub type_name: String,
    /// The field whose selection shape was wrong.
    pub field_name: String,
    /// What was wrong with it.
    pub message: String,
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` on `{}`: {}",
            self.field_name, self.type_name, self.message
        )
    }
}

impl StdError for StructuralError {}

/// An error surfaced by a resolver while producing a value. The engine
/// never inspects or swallows these; they propagate as opaque domain
/// errors.
#[derive(Debug)]
pub struct ResolverError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for ResolverError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.0.as_ref())
    }
}

impl PartialEq for ResolverError {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

/// The unified error type returned by every fallible operation in this
/// crate family, grouping the three failure tiers (parse-time, schema
/// binding, and resolver-domain) behind one `std::error::Error` impl.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Query text could not be tokenized or parsed.
    Syntax(SyntaxError),
    /// A selection named an undeclared field.
    FieldNotDefined(FieldNotDefinedError),
    /// A selection referenced an undefined fragment.
    FragmentNotDefined(FragmentNotDefinedError),
    /// A schema reference named an unregistered type.
    TypeNotFound(TypeNotFoundError),
    /// A query called an unregistered root call.
    RootCallNotFound(RootCallNotFoundError),
    /// A selection's shape did not match the resolved value.
    Structural(StructuralError),
    /// A resolver raised a domain-specific error.
    Resolver(ResolverError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax(err) => write!(f, "{err}"),
            Error::FieldNotDefined(err) => write!(f, "{err}"),
            Error::FragmentNotDefined(err) => write!(f, "{err}"),
            Error::TypeNotFound(err) => write!(f, "{err}"),
            Error::RootCallNotFound(err) => write!(f, "{err}"),
            Error::Structural(err) => write!(f, "{err}"),
            Error::Resolver(err) => write!(f, "{err}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Syntax(err) => Some(err),
            Error::FieldNotDefined(err) => Some(err),
            Error::FragmentNotDefined(err) => Some(err),
            Error::TypeNotFound(err) => Some(err),
            Error::RootCallNotFound(err) => Some(err),
            Error::Structural(err) => Some(err),
            Error::Resolver(err) => Some(err),
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Error::Syntax(err)
    }
}

impl From<FieldNotDefinedError> for Error {
    fn from(err: FieldNotDefinedError) -> Self {
        Error::FieldNotDefined(err)
    }
}

impl From<FragmentNotDefinedError> for Error {
    fn from(err: FragmentNotDefinedError) -> Self {
        Error::FragmentNotDefined(err)
    }
}

impl From<TypeNotFoundError> for Error {
    fn from(err: TypeNotFoundError) -> Self {
        Error::TypeNotFound(err)
    }
}

impl From<RootCallNotFoundError> for Error {
    fn from(err: RootCallNotFoundError) -> Self {
        Error::RootCallNotFound(err)
    }
}

impl From<StructuralError> for Error {
    fn from(err: StructuralError) -> Self {
        Error::Structural(err)
    }
}

impl Error {
    /// Wraps an opaque resolver-domain error, never
    /// inspected or altered by the engine.
    pub fn resolver(err: impl StdError + Send + Sync + 'static) -> Error {
        Error::Resolver(ResolverError(Box::new(err)))
    }
}

//! Errors raised by quad models and their views.
use quadmodel_term::Term;
use thiserror::Error;

use crate::quad::Position;

/// Type alias for `Result` with default error [`ModelError`].
pub type ModelResult<T, E = ModelError> = std::result::Result<T, E>;

/// This error is raised when an operation on a quad model can not be performed.
///
/// Looking up terms that the model does not know is never an error:
/// such lookups simply match nothing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Subject, predicate and object are mandatory when adding a quad.
    #[error("Cannot add a quad without a {0}")]
    MissingComponent(Position),
    /// The term can not occupy that position (e.g. a literal subject).
    #[error("{term} is not allowed in {position} position")]
    InvalidTerm {
        /// The position where the term was supplied.
        position: Position,
        /// The faulty term.
        term: Term,
    },
    /// The quad contradicts the filter of the view it was written to.
    #[error("Statement is filtered out of view")]
    OutOfScope,
    /// The view does not accept writes.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
    /// A single value was expected, several were found.
    #[error("Expected a single {position} value, found {first} and {second}")]
    MultipleValues {
        /// The position being queried.
        position: Position,
        /// One of the values found.
        first: Term,
        /// Another of the values found.
        second: Term,
    },
    /// A value of another kind was expected.
    #[error("Expected {expected}, found {found}")]
    UnexpectedTerm {
        /// What kind of term was expected.
        expected: &'static str,
        /// The term found.
        found: Term,
    },
}

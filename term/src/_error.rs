use thiserror::Error;

/// Type alias for `Result` with default error `TermError`.
///
/// Can be used like `std::result::Result` as well.
pub type Result<T, E = TermError> = std::result::Result<T, E>;

/// This error is raised when the creation of a term fails.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TermError {
    /// The IRI of a term must apply to [RFC 3987](https://tools.ietf.org/html/rfc3987).
    #[error("The given IRI '{iri}' is not valid according to RFC3987: {msg}")]
    InvalidIri {
        /// The provided, faulty IRI.
        iri: String,
        /// What is wrong with `iri`.
        msg: String,
    },
    /// Blank node identifiers must match Turtle's `BLANK_NODE_LABEL` (without the leading `_:`).
    #[error("The given blank node identifier '{0}' does not comply with Turtle's BLANK_NODE_LABEL")]
    InvalidBlankNodeId(String),
    /// The language tags of literals must match Turtle's `LANGTAG` (without the leading `@`).
    #[error("The given language tag '{0}' does not comply with Turtle's LANGTAG")]
    InvalidLanguageTag(String),
}

//! I define the [`BlankNode`] type,
//! whose identifier satisfies the `BLANK_NODE_LABEL` rule in [Turtle](https://www.w3.org/TR/turtle/#grammar-production-BLANK_NODE_LABEL)
//! (without the leading `_:`).
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::{Result, TermError};

lazy_static! {
    /// Turtle's `BLANK_NODE_LABEL`, without the leading `_:`.
    ///
    /// `BLANK_NODE_LABEL ::= (PN_CHARS_U | [0-9]) ((PN_CHARS | '.')* PN_CHARS)?`
    static ref BNODE_ID: Regex = Regex::new(r"(?x)
      ^
      [A-Za-z\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{2ff}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_0-9]
      (
          [A-Za-z\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{2ff}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_\u{2d}0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}]
          |
          \u{2e} [A-Za-z\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{2ff}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_\u{2d}0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}]
      )*
      $
    ").unwrap();
}

/// A blank node, identified by a label local to the store it lives in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNode(Arc<str>);

impl BlankNode {
    /// Build a new [`BlankNode`] from `id`,
    /// returning an error if it is not a valid `BLANK_NODE_LABEL`.
    pub fn new<T: AsRef<str>>(id: T) -> Result<Self> {
        let id = id.as_ref();
        if BNODE_ID.is_match(id) {
            Ok(BlankNode(Arc::from(id)))
        } else {
            Err(TermError::InvalidBlankNodeId(id.to_string()))
        }
    }

    /// Build a new [`BlankNode`] from `id`, without checking its validity.
    pub fn new_unchecked<T: AsRef<str>>(id: T) -> Self {
        BlankNode(Arc::from(id.as_ref()))
    }

    /// The identifier of this blank node (without the leading `_:`).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `self` and `other` share the same storage.
    pub fn same_as(&self, other: &BlankNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

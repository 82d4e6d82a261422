//! I define the [`Iri`] type,
//! an absolute [IRI](https://tools.ietf.org/html/rfc3987) with shared, immutable storage.
use std::fmt;
use std::sync::Arc;

use crate::{Result, TermError};

/// An absolute IRI.
///
/// Cloning an [`Iri`] never copies the underlying text,
/// so two clones are [`same_as`](Iri::same_as) each other.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(Arc<str>);

impl Iri {
    /// Build a new [`Iri`] from `iri`,
    /// returning an error if it is not a valid absolute IRI.
    pub fn new<T: AsRef<str>>(iri: T) -> Result<Self> {
        let txt = iri.as_ref();
        match oxiri::Iri::parse(txt) {
            Ok(_) => Ok(Iri(Arc::from(txt))),
            Err(err) => Err(TermError::InvalidIri {
                iri: txt.to_string(),
                msg: err.to_string(),
            }),
        }
    }

    /// Build a new [`Iri`] from `iri`, without checking its validity.
    pub fn new_unchecked<T: AsRef<str>>(iri: T) -> Self {
        Iri(Arc::from(iri.as_ref()))
    }

    /// Gets a reference to the underlying `str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `self` and `other` share the same storage
    /// (which implies that they are equal).
    pub fn same_as(&self, other: &Iri) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Iri {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

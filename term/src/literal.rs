//! I define the [`Literal`] type.
use std::fmt;
use std::sync::Arc;

use crate::ns::{rdf, xsd};
use crate::{Iri, LanguageTag};

/// An RDF literal: a lexical form, plus either a language tag or a datatype.
///
/// Literals built with [`Literal::new_simple`] have datatype `xsd:string`;
/// language-tagged literals have datatype `rdf:langString`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    lexical: Arc<str>,
    annotation: Annotation,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Annotation {
    Language(LanguageTag),
    Datatype(Iri),
}

impl Literal {
    /// A literal of datatype `xsd:string`.
    pub fn new_simple<T: AsRef<str>>(lexical: T) -> Self {
        Self::new_typed(lexical, xsd::string.clone())
    }

    /// A language-tagged string.
    pub fn new_lang<T: AsRef<str>>(lexical: T, tag: LanguageTag) -> Self {
        Literal {
            lexical: Arc::from(lexical.as_ref()),
            annotation: Annotation::Language(tag),
        }
    }

    /// A literal with an explicit datatype.
    pub fn new_typed<T: AsRef<str>>(lexical: T, datatype: Iri) -> Self {
        Literal {
            lexical: Arc::from(lexical.as_ref()),
            annotation: Annotation::Datatype(datatype),
        }
    }

    /// The lexical form of this literal.
    pub fn lexical_form(&self) -> &str {
        &self.lexical
    }

    /// The language tag of this literal, if any.
    pub fn language_tag(&self) -> Option<&LanguageTag> {
        match &self.annotation {
            Annotation::Language(tag) => Some(tag),
            Annotation::Datatype(_) => None,
        }
    }

    /// The datatype of this literal.
    pub fn datatype(&self) -> Iri {
        match &self.annotation {
            Annotation::Language(_) => rdf::langString.clone(),
            Annotation::Datatype(dt) => dt.clone(),
        }
    }

    /// Whether this literal is a plain `xsd:string`.
    pub fn is_simple(&self) -> bool {
        matches!(&self.annotation, Annotation::Datatype(dt) if dt == &*xsd::string)
    }

    /// Return a copy of this literal, sharing its lexical form,
    /// where the explicit datatype (if any) is replaced by `f(datatype)`.
    ///
    /// `f` must return an IRI equal to its argument;
    /// this is used to make literals share a canonical datatype instance.
    pub fn map_datatype<F>(&self, f: F) -> Literal
    where
        F: FnOnce(&Iri) -> Iri,
    {
        let annotation = match &self.annotation {
            Annotation::Language(tag) => Annotation::Language(tag.clone()),
            Annotation::Datatype(dt) => {
                let mapped = f(dt);
                debug_assert_eq!(&mapped, dt);
                Annotation::Datatype(mapped)
            }
        };
        Literal {
            lexical: self.lexical.clone(),
            annotation,
        }
    }

    /// Whether `self` and `other` share the same storage.
    pub fn same_as(&self, other: &Literal) -> bool {
        Arc::ptr_eq(&self.lexical, &other.lexical)
            && match (&self.annotation, &other.annotation) {
                (Annotation::Language(t1), Annotation::Language(t2)) => t1.same_as(t2),
                (Annotation::Datatype(d1), Annotation::Datatype(d2)) => d1.same_as(d2),
                _ => false,
            }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.lexical.chars() {
            match c {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                _ => write!(f, "{c}")?,
            }
        }
        write!(f, "\"")?;
        match &self.annotation {
            Annotation::Language(tag) => write!(f, "{tag}"),
            Annotation::Datatype(dt) if dt == &*xsd::string => Ok(()),
            Annotation::Datatype(dt) => write!(f, "^^{dt}"),
        }
    }
}

use std::fmt;

use crate::{BlankNode, Iri, LanguageTag, Literal, Result};

/// An RDF term: an IRI, a blank node or a literal.
///
/// Terms are immutable and cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// An IRI
    Iri(Iri),
    /// A blank node
    BlankNode(BlankNode),
    /// A literal
    Literal(Literal),
}

/// The different kinds of [`Term`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// An IRI
    Iri,
    /// A blank node
    BlankNode,
    /// A literal
    Literal,
}

/// A graph name is an optional [`Term`].
///
/// By convention, `None` is the "name" of the default graph.
pub type GraphName = Option<Term>;

impl Term {
    /// Build an IRI term, checking its validity.
    pub fn iri<T: AsRef<str>>(iri: T) -> Result<Self> {
        Iri::new(iri).map(Term::Iri)
    }

    /// Build a blank node term, checking its identifier.
    pub fn blank_node<T: AsRef<str>>(id: T) -> Result<Self> {
        BlankNode::new(id).map(Term::BlankNode)
    }

    /// Build a literal term of datatype `xsd:string`.
    pub fn simple_literal<T: AsRef<str>>(lexical: T) -> Self {
        Term::Literal(Literal::new_simple(lexical))
    }

    /// Build a language-tagged literal term, checking the tag.
    pub fn lang_literal<T: AsRef<str>, U: AsRef<str>>(lexical: T, tag: U) -> Result<Self> {
        LanguageTag::new(tag).map(|tag| Term::Literal(Literal::new_lang(lexical, tag)))
    }

    /// Build a typed literal term.
    pub fn typed_literal<T: AsRef<str>>(lexical: T, datatype: Iri) -> Self {
        Term::Literal(Literal::new_typed(lexical, datatype))
    }

    /// The kind of this term.
    pub fn kind(&self) -> TermKind {
        match self {
            Term::Iri(_) => TermKind::Iri,
            Term::BlankNode(_) => TermKind::BlankNode,
            Term::Literal(_) => TermKind::Literal,
        }
    }

    /// Whether this term is an IRI.
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Whether this term is a blank node.
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Whether this term is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Whether this term is a resource (an IRI or a blank node),
    /// i.e. whether it can be used as a subject or a graph name.
    pub fn is_resource(&self) -> bool {
        !self.is_literal()
    }

    /// This term as an IRI, if it is one.
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// This term as a blank node, if it is one.
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Term::BlankNode(bn) => Some(bn),
            _ => None,
        }
    }

    /// This term as a literal, if it is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Whether `self` and `other` share the same storage.
    ///
    /// Equal terms obtained from the same interner are always the same;
    /// equal terms built independently are not.
    pub fn same_as(&self, other: &Term) -> bool {
        match (self, other) {
            (Term::Iri(i1), Term::Iri(i2)) => i1.same_as(i2),
            (Term::BlankNode(b1), Term::BlankNode(b2)) => b1.same_as(b2),
            (Term::Literal(l1), Term::Literal(l2)) => l1.same_as(l2),
            _ => false,
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<BlankNode> for Term {
    fn from(bn: BlankNode) -> Self {
        Term::BlankNode(bn)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl From<&Iri> for Term {
    fn from(iri: &Iri) -> Self {
        Term::Iri(iri.clone())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => fmt::Display::fmt(iri, f),
            Term::BlankNode(bn) => fmt::Display::fmt(bn, f),
            Term::Literal(lit) => fmt::Display::fmt(lit, f),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ns::xsd;
    use test_case::test_case;

    #[test_case(Term::iri("http://example.org/").unwrap(), TermKind::Iri, true; "iri")]
    #[test_case(Term::blank_node("b1").unwrap(), TermKind::BlankNode, true; "blank node")]
    #[test_case(Term::simple_literal("x"), TermKind::Literal, false; "simple literal")]
    #[test_case(Term::lang_literal("x", "en").unwrap(), TermKind::Literal, false; "language literal")]
    fn kinds(term: Term, kind: TermKind, resource: bool) {
        assert_eq!(term.kind(), kind);
        assert_eq!(term.is_resource(), resource);
        assert_eq!(term.is_iri(), kind == TermKind::Iri);
        assert_eq!(term.is_blank_node(), kind == TermKind::BlankNode);
        assert_eq!(term.is_literal(), kind == TermKind::Literal);
    }

    #[test]
    fn equality_is_by_content() -> Result<()> {
        let t1 = Term::iri("http://example.org/a")?;
        let t2 = Term::iri("http://example.org/a")?;
        assert_eq!(t1, t2);
        assert!(!t1.same_as(&t2));
        assert!(t1.same_as(&t1.clone()));
        assert_ne!(t1, Term::blank_node("a")?);
        assert_ne!(
            Term::simple_literal("1"),
            Term::typed_literal("1", xsd::integer.clone())
        );
        Ok(())
    }

    #[test]
    fn accessors() -> Result<()> {
        let t = Term::iri("http://example.org/a")?;
        assert_eq!(t.as_iri().map(Iri::as_str), Some("http://example.org/a"));
        assert!(t.as_blank_node().is_none());
        assert!(t.as_literal().is_none());
        let t = Term::lang_literal("a", "en")?;
        assert_eq!(t.as_literal().map(Literal::lexical_form), Some("a"));
        assert_eq!(t.to_string(), "\"a\"@en");
        Ok(())
    }
}

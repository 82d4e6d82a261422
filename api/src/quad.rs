//! A quad expresses a single fact within a context:
//! a subject, a predicate and an object, plus an optional graph name
//! (`None` standing for the default graph).

use std::fmt;

use quadmodel_term::{GraphName, Term};

use crate::error::{ModelError, ModelResult};

/// One of the four positions of a [`Quad`].
///
/// The order of the variants (see [`Position::ALL`])
/// is also the priority used to break ties between equally selective positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    /// The subject position
    Subject,
    /// The predicate position
    Predicate,
    /// The object position
    Object,
    /// The context (graph name) position
    Context,
}

impl Position {
    /// All positions, in priority order.
    pub const ALL: [Position; 4] = [
        Position::Subject,
        Position::Predicate,
        Position::Object,
        Position::Context,
    ];

    /// The index of this position in [`Position::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether `term` may occupy this position:
    /// subjects and graph names are IRIs or blank nodes,
    /// predicates are IRIs, objects can be any term.
    pub fn accepts(self, term: &Term) -> bool {
        match self {
            Position::Subject | Position::Context => term.is_resource(),
            Position::Predicate => term.is_iri(),
            Position::Object => true,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let txt = match self {
            Position::Subject => "subject",
            Position::Predicate => "predicate",
            Position::Object => "object",
            Position::Context => "context",
        };
        f.write_str(txt)
    }
}

/// A quad of owned [`Term`]s.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quad {
    /// The subject of this quad.
    pub subject: Term,
    /// The predicate of this quad.
    pub predicate: Term,
    /// The object of this quad.
    pub object: Term,
    /// The graph name of this quad (`None` for the default graph).
    pub context: GraphName,
}

impl Quad {
    /// Build a new quad.
    pub fn new<S, P, O>(subject: S, predicate: P, object: O, context: GraphName) -> Self
    where
        S: Into<Term>,
        P: Into<Term>,
        O: Into<Term>,
    {
        Quad {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            context,
        }
    }

    /// The subject of this quad.
    pub fn s(&self) -> &Term {
        &self.subject
    }

    /// The predicate of this quad.
    pub fn p(&self) -> &Term {
        &self.predicate
    }

    /// The object of this quad.
    pub fn o(&self) -> &Term {
        &self.object
    }

    /// The (optional) graph name of this quad.
    pub fn g(&self) -> Option<&Term> {
        self.context.as_ref()
    }

    /// The term at the given position (`None` for the default graph).
    pub fn get(&self, position: Position) -> Option<&Term> {
        match position {
            Position::Subject => Some(&self.subject),
            Position::Predicate => Some(&self.predicate),
            Position::Object => Some(&self.object),
            Position::Context => self.context.as_ref(),
        }
    }

    /// Check that every term of this quad is allowed in its position.
    pub fn check(&self) -> ModelResult<()> {
        for position in Position::ALL {
            if let Some(term) = self.get(position) {
                if !position.accepts(term) {
                    return Err(ModelError::InvalidTerm {
                        position,
                        term: term.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if let Some(g) = &self.context {
            write!(f, " {g}")?;
        }
        write!(f, " .")
    }
}

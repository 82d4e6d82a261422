//! Quad patterns, used both to query a model and to describe the filter of a view.

use std::fmt;

use quadmodel_term::{GraphName, Term};

use crate::quad::{Position, Quad};

/// A quad pattern: optional subject, predicate and object, plus a set of graph names.
///
/// * `None` in the subject, predicate or object position is a wildcard.
/// * An empty `contexts` list matches every graph;
///   otherwise only the listed graphs match,
///   and a `None` entry stands for the default graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QuadPattern {
    /// The subject, if bound.
    pub subject: Option<Term>,
    /// The predicate, if bound.
    pub predicate: Option<Term>,
    /// The object, if bound.
    pub object: Option<Term>,
    /// The accepted graph names; empty means any graph.
    pub contexts: Vec<GraphName>,
}

impl QuadPattern {
    /// The pattern matching every quad.
    pub fn any() -> Self {
        Self::default()
    }

    /// Build a pattern from its components.
    ///
    /// Duplicate graph names are ignored.
    pub fn new<I>(subject: Option<Term>, predicate: Option<Term>, object: Option<Term>, contexts: I) -> Self
    where
        I: IntoIterator<Item = GraphName>,
    {
        contexts.into_iter().fold(
            QuadPattern {
                subject,
                predicate,
                object,
                contexts: vec![],
            },
            QuadPattern::with_context,
        )
    }

    /// The pattern matching exactly `quad`.
    pub fn of_quad(quad: &Quad) -> Self {
        QuadPattern {
            subject: Some(quad.subject.clone()),
            predicate: Some(quad.predicate.clone()),
            object: Some(quad.object.clone()),
            contexts: vec![quad.context.clone()],
        }
    }

    /// Bind the subject.
    pub fn with_subject<T: Into<Term>>(mut self, subject: T) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Bind the predicate.
    pub fn with_predicate<T: Into<Term>>(mut self, predicate: T) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    /// Bind the object.
    pub fn with_object<T: Into<Term>>(mut self, object: T) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Add `context` to the accepted graph names.
    pub fn with_context(mut self, context: GraphName) -> Self {
        if !self.contexts.contains(&context) {
            self.contexts.push(context);
        }
        self
    }

    /// Add the default graph to the accepted graph names.
    pub fn in_default_graph(self) -> Self {
        self.with_context(None)
    }

    /// Bind `position` to `term`.
    ///
    /// For [`Position::Context`], this adds `Some(term)` to the accepted graph names.
    pub fn with(self, position: Position, term: Term) -> Self {
        match position {
            Position::Subject => self.with_subject(term),
            Position::Predicate => self.with_predicate(term),
            Position::Object => self.with_object(term),
            Position::Context => self.with_context(Some(term)),
        }
    }

    /// The term bound in the subject, predicate or object position.
    ///
    /// Always `None` for [`Position::Context`], see [`QuadPattern::contexts`].
    pub fn get(&self, position: Position) -> Option<&Term> {
        match position {
            Position::Subject => self.subject.as_ref(),
            Position::Predicate => self.predicate.as_ref(),
            Position::Object => self.object.as_ref(),
            Position::Context => None,
        }
    }

    /// Whether this pattern binds nothing.
    pub fn is_wildcard(&self) -> bool {
        self.subject.is_none()
            && self.predicate.is_none()
            && self.object.is_none()
            && self.contexts.is_empty()
    }

    /// Whether this pattern binds every position to a single value.
    pub fn is_exact(&self) -> bool {
        self.subject.is_some()
            && self.predicate.is_some()
            && self.object.is_some()
            && self.contexts.len() == 1
    }

    /// Whether `quad` matches this pattern.
    pub fn matches(&self, quad: &Quad) -> bool {
        fn bound_eq(bound: &Option<Term>, term: &Term) -> bool {
            bound.as_ref().map_or(true, |b| b == term)
        }
        bound_eq(&self.subject, &quad.subject)
            && bound_eq(&self.predicate, &quad.predicate)
            && bound_eq(&self.object, &quad.object)
            && (self.contexts.is_empty() || self.contexts.contains(&quad.context))
    }

    /// The conjunction of this pattern with `filter`,
    /// or `None` if they contradict each other.
    ///
    /// * In each position, a value bound by only one side applies;
    ///   values bound by both sides must be equal.
    /// * Graph names are intersected (keeping the order of `self`),
    ///   an empty list on either side deferring to the other side;
    ///   an empty intersection is a contradiction.
    pub fn merge(&self, filter: &QuadPattern) -> Option<QuadPattern> {
        fn merge_term(input: &Option<Term>, fixed: &Option<Term>) -> Option<Option<Term>> {
            match (input, fixed) {
                (None, _) => Some(fixed.clone()),
                (Some(_), None) => Some(input.clone()),
                (Some(i), Some(f)) if i == f => Some(input.clone()),
                _ => None,
            }
        }
        let contexts = if self.contexts.is_empty() {
            filter.contexts.clone()
        } else if filter.contexts.is_empty() {
            self.contexts.clone()
        } else {
            let common: Vec<_> = self
                .contexts
                .iter()
                .filter(|c| filter.contexts.contains(c))
                .cloned()
                .collect();
            if common.is_empty() {
                return None;
            }
            common
        };
        Some(QuadPattern {
            subject: merge_term(&self.subject, &filter.subject)?,
            predicate: merge_term(&self.predicate, &filter.predicate)?,
            object: merge_term(&self.object, &filter.object)?,
            contexts,
        })
    }
}

impl From<&Quad> for QuadPattern {
    fn from(quad: &Quad) -> Self {
        QuadPattern::of_quad(quad)
    }
}

impl fmt::Display for QuadPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for term in [&self.subject, &self.predicate, &self.object] {
            match term {
                Some(t) => write!(f, "{t} ")?,
                None => write!(f, "* ")?,
            }
        }
        if self.contexts.is_empty() {
            return write!(f, "*");
        }
        write!(f, "{{")?;
        for (i, c) in self.contexts.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match c {
                Some(g) => write!(f, "{g}")?,
                None => write!(f, "DEFAULT")?,
            }
        }
        write!(f, "}}")
    }
}

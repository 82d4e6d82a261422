//! Set-like views over the terms found in one position of a model.
//!
//! [`TermSet`] covers subjects, predicates and objects;
//! [`ContextSet`] covers graph names, the default graph being `None`.
//! Both are computed on the fly from the underlying model:
//! membership is a pattern lookup, removal is a pattern removal,
//! and insertion only succeeds when the model (typically a [filtered view](crate::view::View))
//! can supply the other mandatory positions.

use quadmodel_term::{GraphName, Term};

use crate::error::ModelResult;
use crate::model::{distinct, MutableQuadModel, QuadModel};
use crate::pattern::QuadPattern;
use crate::quad::Position;

/// The distinct subjects, predicates or objects of a model.
#[derive(Clone, Debug)]
pub struct TermSet<M> {
    model: M,
    position: Position,
}

impl<M> TermSet<M> {
    /// The subjects of `model`.
    pub fn subjects(model: M) -> Self {
        TermSet {
            model,
            position: Position::Subject,
        }
    }

    /// The predicates of `model`.
    pub fn predicates(model: M) -> Self {
        TermSet {
            model,
            position: Position::Predicate,
        }
    }

    /// The objects of `model`.
    pub fn objects(model: M) -> Self {
        TermSet {
            model,
            position: Position::Object,
        }
    }

    /// The position of the terms in this set.
    pub fn position(&self) -> Position {
        self.position
    }

    fn pattern(&self, term: &Term) -> QuadPattern {
        QuadPattern::any().with(self.position, term.clone())
    }
}

impl<M: QuadModel> TermSet<M> {
    /// An iterator over the distinct terms of this set.
    pub fn iter(&self) -> impl Iterator<Item = Term> + '_ {
        let position = self.position;
        distinct(
            self.model
                .quads()
                .filter_map(move |q| q.get(position).cloned()),
        )
    }

    /// The number of distinct terms in this set.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether this set is empty.
    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    /// Whether `term` occurs in this position.
    pub fn contains(&self, term: &Term) -> bool {
        self.model.contains_matching(&self.pattern(term))
    }
}

impl<M: MutableQuadModel> TermSet<M> {
    /// Remove every quad having `term` in this position.
    pub fn remove(&mut self, term: &Term) -> ModelResult<bool> {
        let pattern = self.pattern(term);
        self.model.remove_pattern(&pattern)
    }

    /// Add a quad with `term` in this position,
    /// the other positions being supplied by the model.
    pub fn insert(&mut self, term: &Term) -> ModelResult<bool> {
        let pattern = self.pattern(term);
        self.model.insert_pattern(&pattern)
    }

    /// Remove every quad of the model.
    pub fn clear(&mut self) -> ModelResult<bool> {
        MutableQuadModel::clear(&mut self.model)
    }
}

/// The distinct graph names of a model.
#[derive(Clone, Debug)]
pub struct ContextSet<M> {
    model: M,
}

impl<M> ContextSet<M> {
    /// The graph names of `model`.
    pub fn new(model: M) -> Self {
        ContextSet { model }
    }
}

impl<M: QuadModel> ContextSet<M> {
    /// An iterator over the distinct graph names of this set.
    pub fn iter(&self) -> impl Iterator<Item = GraphName> + '_ {
        distinct(self.model.quads().map(|q| q.context))
    }

    /// The number of distinct graph names in this set.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether this set is empty.
    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    /// Whether graph `name` contains at least one quad.
    pub fn contains(&self, name: &GraphName) -> bool {
        let pattern = QuadPattern::any().with_context(name.clone());
        self.model.contains_matching(&pattern)
    }
}

impl<M: MutableQuadModel> ContextSet<M> {
    /// Remove every quad of graph `name`.
    pub fn remove(&mut self, name: &GraphName) -> ModelResult<bool> {
        self.model.clear_contexts(std::slice::from_ref(name))
    }

    /// Add a quad in graph `name`,
    /// its subject, predicate and object being supplied by the model.
    pub fn insert(&mut self, name: &GraphName) -> ModelResult<bool> {
        let pattern = QuadPattern::any().with_context(name.clone());
        self.model.insert_pattern(&pattern)
    }
}

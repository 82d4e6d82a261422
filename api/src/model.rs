//! A quad model is a set of [quads](crate::quad),
//! queried and updated through [patterns](crate::pattern).
//!
//! This module provides the two traits implemented by every model
//! and by every [view](crate::view) over a model:
//! [`QuadModel`] for reading, [`MutableQuadModel`] for writing.

use std::collections::HashSet;

use quadmodel_term::{GraphName, Iri, Literal, Term};

use crate::bridge::Evaluator;
use crate::error::{ModelError, ModelResult};
use crate::pattern::QuadPattern;
use crate::quad::{Position, Quad};
use crate::term_set::{ContextSet, TermSet};

mod _foreign_impl;

/// Type alias for the quad iterators produced by a model.
pub type QuadIter<'a> = Box<dyn Iterator<Item = Quad> + 'a>;

/// Generic trait for readable sets of quads.
///
/// A model never contains duplicate quads.
pub trait QuadModel {
    /// An iterator visiting all quads matching `pattern`, in arbitrary order.
    ///
    /// Terms that the model does not know simply match nothing.
    fn quads_matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a>;

    /// The number of quads matching `pattern`.
    fn count_matching(&self, pattern: &QuadPattern) -> usize {
        self.quads_matching(pattern).count()
    }

    /// A fast, approximate number of quads matching `pattern`,
    /// usable as a cost estimate by query optimizers.
    ///
    /// The default implementation is exact.
    fn estimate(&self, pattern: &QuadPattern) -> usize {
        self.count_matching(pattern)
    }

    /// Map `term` to the representation used by this model,
    /// so that it can be compared efficiently with the terms this model yields.
    ///
    /// The default implementation returns a clone of `term`.
    fn normalize(&self, term: &Term) -> Term {
        term.clone()
    }

    /// An iterator visiting all quads of this model.
    fn quads(&self) -> QuadIter<'_> {
        self.quads_matching(&QuadPattern::any())
    }

    /// The number of quads in this model.
    fn len(&self) -> usize {
        self.count_matching(&QuadPattern::any())
    }

    /// Whether this model contains no quad.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this model contains the given quad.
    ///
    /// NB: `Vec<Quad>` implements this trait,
    /// and this method takes precedence over the slice method `contains`
    /// wherever the trait is in scope;
    /// use [`contains_quad`](QuadModel::contains_quad) or `v[..].contains(&q)` for vectors of quads.
    fn contains(&self, s: &Term, p: &Term, o: &Term, g: Option<&Term>) -> bool {
        let pattern = QuadPattern::new(
            Some(s.clone()),
            Some(p.clone()),
            Some(o.clone()),
            [g.cloned()],
        );
        self.contains_matching(&pattern)
    }

    /// Whether this model contains `quad`.
    fn contains_quad(&self, quad: &Quad) -> bool {
        self.contains_matching(&QuadPattern::of_quad(quad))
    }

    /// Whether at least one quad of this model matches `pattern`.
    fn contains_matching(&self, pattern: &QuadPattern) -> bool {
        self.quads_matching(pattern).next().is_some()
    }

    /// The set of subjects of this model.
    fn subjects(&self) -> TermSet<&Self>
    where
        Self: Sized,
    {
        TermSet::subjects(self)
    }

    /// The set of predicates of this model.
    fn predicates(&self) -> TermSet<&Self>
    where
        Self: Sized,
    {
        TermSet::predicates(self)
    }

    /// The set of objects of this model.
    fn objects(&self) -> TermSet<&Self>
    where
        Self: Sized,
    {
        TermSet::objects(self)
    }

    /// The set of graph names of this model.
    fn contexts(&self) -> ContextSet<&Self>
    where
        Self: Sized,
    {
        ContextSet::new(self)
    }

    /// The only object of this model, if any.
    ///
    /// This is typically called on a [view](crate::view::View)
    /// fixing the subject and predicate.
    ///
    /// # Errors
    /// [`ModelError::MultipleValues`] if several distinct objects are found.
    fn object_value(&self) -> ModelResult<Option<Term>> {
        let mut found: Option<Term> = None;
        for q in self.quads() {
            if let Some(first) = &found {
                if *first != q.object {
                    return Err(ModelError::MultipleValues {
                        position: Position::Object,
                        first: first.clone(),
                        second: q.object,
                    });
                }
            } else {
                found = Some(q.object);
            }
        }
        Ok(found)
    }

    /// The only object of this model, if any, which must be a literal.
    fn object_literal(&self) -> ModelResult<Option<Literal>> {
        match self.object_value()? {
            None => Ok(None),
            Some(Term::Literal(lit)) => Ok(Some(lit)),
            Some(other) => Err(ModelError::UnexpectedTerm {
                expected: "a literal",
                found: other,
            }),
        }
    }

    /// The only object of this model, if any, which must be an IRI or a blank node.
    fn object_resource(&self) -> ModelResult<Option<Term>> {
        match self.object_value()? {
            Some(lit @ Term::Literal(_)) => Err(ModelError::UnexpectedTerm {
                expected: "a resource",
                found: lit,
            }),
            other => Ok(other),
        }
    }

    /// The only object of this model, if any, which must be an IRI.
    fn object_iri(&self) -> ModelResult<Option<Iri>> {
        match self.object_value()? {
            None => Ok(None),
            Some(Term::Iri(iri)) => Ok(Some(iri)),
            Some(other) => Err(ModelError::UnexpectedTerm {
                expected: "an IRI",
                found: other,
            }),
        }
    }

    /// The textual value of the only object of this model, if any:
    /// the IRI of an IRI, the identifier of a blank node, the lexical form of a literal.
    fn object_string(&self) -> ModelResult<Option<String>> {
        Ok(self.object_value()?.map(|t| match t {
            Term::Iri(iri) => iri.as_str().to_string(),
            Term::BlankNode(bn) => bn.as_str().to_string(),
            Term::Literal(lit) => lit.lexical_form().to_string(),
        }))
    }

    /// Evaluate `expr` against this model with an external [`Evaluator`],
    /// starting from the given `bindings`.
    fn evaluate<'s, E>(
        &'s self,
        evaluator: &E,
        expr: &E::Expr,
        bindings: &E::Bindings,
    ) -> Result<Box<dyn Iterator<Item = E::Bindings> + 's>, E::Error>
    where
        Self: Sized,
        E: Evaluator,
    {
        evaluator.evaluate(self, expr, bindings)
    }
}

/// Generic trait for mutable sets of quads.
///
/// Methods return `Ok(true)` when the model was actually changed.
pub trait MutableQuadModel: QuadModel {
    /// Add the quad described by `pattern`, once per graph name in `pattern.contexts`
    /// (or in the default graph if `pattern.contexts` is empty).
    ///
    /// Returns `Ok(true)` if any of those quads was not already present.
    ///
    /// # Errors
    /// [`ModelError::MissingComponent`] if the subject, predicate or object is not bound,
    /// [`ModelError::InvalidTerm`] if a term is not allowed in its position.
    fn insert_pattern(&mut self, pattern: &QuadPattern) -> ModelResult<bool>;

    /// Remove every quad matching `pattern`.
    ///
    /// Returns `Ok(true)` if at least one quad was removed.
    fn remove_pattern(&mut self, pattern: &QuadPattern) -> ModelResult<bool>;

    /// Add the given quad.
    fn insert(&mut self, s: &Term, p: &Term, o: &Term, g: Option<&Term>) -> ModelResult<bool> {
        let pattern = QuadPattern::new(
            Some(s.clone()),
            Some(p.clone()),
            Some(o.clone()),
            [g.cloned()],
        );
        self.insert_pattern(&pattern)
    }

    /// Add `quad`.
    fn insert_quad(&mut self, quad: &Quad) -> ModelResult<bool> {
        self.insert_pattern(&QuadPattern::of_quad(quad))
    }

    /// Add all the given quads, returning how many were not already present.
    fn insert_all<I>(&mut self, quads: I) -> ModelResult<usize>
    where
        I: IntoIterator<Item = Quad>,
        Self: Sized,
    {
        let mut count = 0;
        for q in quads {
            if self.insert_quad(&q)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Remove the given quad.
    fn remove(&mut self, s: &Term, p: &Term, o: &Term, g: Option<&Term>) -> ModelResult<bool> {
        let pattern = QuadPattern::new(
            Some(s.clone()),
            Some(p.clone()),
            Some(o.clone()),
            [g.cloned()],
        );
        self.remove_pattern(&pattern)
    }

    /// Remove `quad`.
    fn remove_quad(&mut self, quad: &Quad) -> ModelResult<bool> {
        self.remove_pattern(&QuadPattern::of_quad(quad))
    }

    /// Remove all the given quads, returning how many were actually present.
    fn remove_all<I>(&mut self, quads: I) -> ModelResult<usize>
    where
        I: IntoIterator<Item = Quad>,
        Self: Sized,
    {
        let mut count = 0;
        for q in quads {
            if self.remove_quad(&q)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Remove every quad matching `pattern`, alias of [`remove_pattern`](MutableQuadModel::remove_pattern).
    fn remove_matching(&mut self, pattern: &QuadPattern) -> ModelResult<bool> {
        self.remove_pattern(pattern)
    }

    /// Keep only the quads matching `pattern` for which `keep` returns true.
    /// Quads not matching `pattern` are kept as well.
    ///
    /// Returns the number of removed quads.
    fn retain_matching<F>(&mut self, pattern: &QuadPattern, mut keep: F) -> ModelResult<usize>
    where
        F: FnMut(&Quad) -> bool,
        Self: Sized,
    {
        let doomed: Vec<Quad> = self
            .quads_matching(pattern)
            .filter(|q| !keep(q))
            .collect();
        self.remove_all(doomed)
    }

    /// Remove every quad.
    fn clear(&mut self) -> ModelResult<bool> {
        self.remove_pattern(&QuadPattern::any())
    }

    /// Remove every quad in the given graphs
    /// (in every graph if `contexts` is empty).
    fn clear_contexts(&mut self, contexts: &[GraphName]) -> ModelResult<bool> {
        self.remove_pattern(&QuadPattern::new(None, None, None, contexts.iter().cloned()))
    }
}

/// Check the components of a pattern passed to [`MutableQuadModel::insert_pattern`],
/// returning the subject, predicate and object,
/// and the graph names to insert into.
///
/// This is meant to help implementors of [`MutableQuadModel`].
pub fn insertable(pattern: &QuadPattern) -> ModelResult<(&Term, &Term, &Term, &[GraphName])> {
    let s = pattern
        .subject
        .as_ref()
        .ok_or(ModelError::MissingComponent(Position::Subject))?;
    let p = pattern
        .predicate
        .as_ref()
        .ok_or(ModelError::MissingComponent(Position::Predicate))?;
    let o = pattern
        .object
        .as_ref()
        .ok_or(ModelError::MissingComponent(Position::Object))?;
    for (position, term) in [
        (Position::Subject, s),
        (Position::Predicate, p),
        (Position::Object, o),
    ] {
        check_position(position, term)?;
    }
    for g in pattern.contexts.iter().flatten() {
        check_position(Position::Context, g)?;
    }
    const DEFAULT_GRAPH_ONLY: &[GraphName] = &[None];
    let contexts = if pattern.contexts.is_empty() {
        DEFAULT_GRAPH_ONLY
    } else {
        &pattern.contexts[..]
    };
    Ok((s, p, o, contexts))
}

fn check_position(position: Position, term: &Term) -> ModelResult<()> {
    if position.accepts(term) {
        Ok(())
    } else {
        Err(ModelError::InvalidTerm {
            position,
            term: term.clone(),
        })
    }
}

/// Iterate over the distinct values produced by `iter`.
pub(crate) fn distinct<'a, T, I>(iter: I) -> impl Iterator<Item = T> + 'a
where
    T: Clone + Eq + std::hash::Hash + 'a,
    I: Iterator<Item = T> + 'a,
{
    let mut seen = HashSet::new();
    iter.filter(move |t| seen.insert(t.clone()))
}

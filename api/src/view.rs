//! Views present a restricted or read-only projection of a model,
//! without copying its quads.
//!
//! A single type, [`View`], covers the three kinds of views:
//! * a *filtered* view only sees (and only accepts) the quads matching its filter;
//! * an *unmodifiable* view rejects every write;
//! * an *empty* view sees nothing, rejects insertions, and ignores removals.
//!
//! Filtering a view again does not nest views:
//! the new filter is merged into the existing one,
//! and a contradiction between them turns the view into an empty view.
//!
//! ```
//! # use quadmodel_api::prelude::*;
//! # use std::collections::HashSet;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let a = Term::iri("http://example.org/a")?;
//! let b = Term::iri("http://example.org/b")?;
//! let mut model: HashSet<Quad> = HashSet::new();
//! MutableQuadModel::insert(&mut model, &a, &a, &b, None)?;
//!
//! let view = View::filtered(&model, QuadPattern::any().with_subject(a.clone()));
//! assert_eq!(view.len(), 1);
//! let view = view.filter(&QuadPattern::any().with_subject(b.clone()));
//! assert!(view.is_empty_view());
//! assert_eq!(view.len(), 0);
//! # Ok(())
//! # }
//! ```

use quadmodel_term::Term;

use crate::error::{ModelError, ModelResult};
use crate::model::{MutableQuadModel, QuadIter, QuadModel};
use crate::pattern::QuadPattern;

mod _subset;
pub use _subset::*;

/// A filtered, unmodifiable or empty view over a model `M`.
///
/// `M` is typically a reference (`&M` or `&mut M`) to a model;
/// writes are only available if `M` implements [`MutableQuadModel`].
#[derive(Clone, Debug)]
pub struct View<M> {
    model: M,
    // None if the view is empty
    filter: Option<QuadPattern>,
    writable: bool,
}

impl<M> View<M> {
    /// A writable view seeing every quad of `model`.
    pub fn new(model: M) -> Self {
        View {
            model,
            filter: Some(QuadPattern::any()),
            writable: true,
        }
    }

    /// A writable view only seeing the quads of `model` matching `filter`.
    pub fn filtered(model: M, filter: QuadPattern) -> Self {
        View {
            model,
            filter: Some(filter),
            writable: true,
        }
    }

    /// A read-only view seeing every quad of `model`.
    pub fn unmodifiable(model: M) -> Self {
        View {
            model,
            filter: Some(QuadPattern::any()),
            writable: false,
        }
    }

    /// A view seeing no quad at all.
    pub fn empty(model: M) -> Self {
        View {
            model,
            filter: None,
            writable: false,
        }
    }

    /// Restrict this view to the quads also matching `filter`.
    ///
    /// The result has a single filter, the conjunction of both;
    /// if they contradict each other, the result is an empty view.
    pub fn filter(self, filter: &QuadPattern) -> Self {
        let merged = match &self.filter {
            Some(current) => current.merge(filter),
            None => return self,
        };
        if merged.is_none() {
            log::debug!("filter {filter} contradicts view, which becomes empty");
        }
        View {
            filter: merged,
            ..self
        }
    }

    /// Make this view read-only.
    pub fn read_only(self) -> Self {
        View {
            writable: false,
            ..self
        }
    }

    /// The filter of this view, or `None` if this view is empty.
    pub fn scope(&self) -> Option<&QuadPattern> {
        self.filter.as_ref()
    }

    /// Whether this view is empty, whatever the underlying model contains.
    pub fn is_empty_view(&self) -> bool {
        self.filter.is_none()
    }

    /// Whether this view accepts writes (provided that its model does).
    pub fn is_writable(&self) -> bool {
        self.writable && self.filter.is_some()
    }

    /// The underlying model.
    pub fn inner(&self) -> &M {
        &self.model
    }

    /// Consume this view, returning the underlying model.
    pub fn into_inner(self) -> M {
        self.model
    }

    fn scoped(&self, pattern: &QuadPattern) -> Option<QuadPattern> {
        pattern.merge(self.filter.as_ref()?)
    }
}

impl<M: QuadModel> QuadModel for View<M> {
    fn quads_matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a> {
        match self.scoped(pattern) {
            Some(merged) => self.model.quads_matching(&merged),
            None => Box::new(std::iter::empty()),
        }
    }

    fn count_matching(&self, pattern: &QuadPattern) -> usize {
        self.scoped(pattern)
            .map_or(0, |merged| self.model.count_matching(&merged))
    }

    fn estimate(&self, pattern: &QuadPattern) -> usize {
        self.scoped(pattern)
            .map_or(0, |merged| self.model.estimate(&merged))
    }

    fn normalize(&self, term: &Term) -> Term {
        self.model.normalize(term)
    }

    fn contains_matching(&self, pattern: &QuadPattern) -> bool {
        self.scoped(pattern)
            .is_some_and(|merged| self.model.contains_matching(&merged))
    }
}

impl<M: MutableQuadModel> MutableQuadModel for View<M> {
    fn insert_pattern(&mut self, pattern: &QuadPattern) -> ModelResult<bool> {
        if self.filter.is_none() {
            return Err(ModelError::Unsupported(
                "All statements are filtered out of view",
            ));
        }
        if !self.writable {
            return Err(ModelError::Unsupported("view is read-only"));
        }
        let merged = self.scoped(pattern).ok_or(ModelError::OutOfScope)?;
        self.model.insert_pattern(&merged)
    }

    fn remove_pattern(&mut self, pattern: &QuadPattern) -> ModelResult<bool> {
        if self.filter.is_none() {
            return Ok(false);
        }
        if !self.writable {
            return Err(ModelError::Unsupported("view is read-only"));
        }
        match self.scoped(pattern) {
            Some(merged) => self.model.remove_pattern(&merged),
            None => Ok(false),
        }
    }
}

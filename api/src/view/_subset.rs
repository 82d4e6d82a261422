use std::collections::{HashMap, HashSet};

use quadmodel_term::Term;

use crate::model::{QuadIter, QuadModel};
use crate::pattern::QuadPattern;
use crate::quad::Quad;

/// An immutable view over an explicit subset of the quads of a model.
///
/// Quads are grouped by predicate.
/// When a query binds a predicate whose group is larger than
/// the model's own estimate for that query,
/// the model is scanned instead and its results are checked for membership.
#[derive(Clone, Debug)]
pub struct Subset<M> {
    model: M,
    members: HashSet<Quad>,
    by_predicate: HashMap<Term, Vec<Quad>>,
}

impl<M: QuadModel> Subset<M> {
    /// Build a subset of `model` from `quads`.
    ///
    /// Quads not contained in `model` are ignored, and so are duplicates.
    pub fn new<I>(model: M, quads: I) -> Self
    where
        I: IntoIterator<Item = Quad>,
    {
        let mut members = HashSet::new();
        let mut by_predicate: HashMap<Term, Vec<Quad>> = HashMap::new();
        for q in quads {
            if members.contains(&q) || !model.contains_quad(&q) {
                continue;
            }
            by_predicate
                .entry(q.predicate.clone())
                .or_default()
                .push(q.clone());
            members.insert(q);
        }
        Subset {
            model,
            members,
            by_predicate,
        }
    }

    /// The underlying model.
    pub fn inner(&self) -> &M {
        &self.model
    }

    fn candidates(&self, pattern: &QuadPattern) -> Option<&[Quad]> {
        pattern
            .predicate
            .as_ref()
            .map(|p| self.by_predicate.get(p).map_or(&[][..], Vec::as_slice))
    }
}

impl<M: QuadModel> QuadModel for Subset<M> {
    fn quads_matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a> {
        let local = match self.candidates(pattern) {
            Some(group) => group.len(),
            None => self.members.len(),
        };
        if local > 0 && self.model.estimate(pattern) < local {
            let members = &self.members;
            return Box::new(
                self.model
                    .quads_matching(pattern)
                    .filter(move |q| members.contains(q)),
            );
        }
        let pattern = pattern.clone();
        match self.candidates(&pattern) {
            Some(group) => Box::new(group.iter().filter(move |q| pattern.matches(q)).cloned()),
            None => Box::new(
                self.by_predicate
                    .values()
                    .flatten()
                    .filter(move |q| pattern.matches(q))
                    .cloned(),
            ),
        }
    }

    fn estimate(&self, pattern: &QuadPattern) -> usize {
        let local = match self.candidates(pattern) {
            Some(group) => group.len(),
            None => self.members.len(),
        };
        if local == 0 {
            return 0;
        }
        local.min(self.model.estimate(pattern))
    }

    fn normalize(&self, term: &Term) -> Term {
        self.model.normalize(term)
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn contains_matching(&self, pattern: &QuadPattern) -> bool {
        if let (Some(s), Some(p), Some(o), [g]) = (
            &pattern.subject,
            &pattern.predicate,
            &pattern.object,
            &pattern.contexts[..],
        ) {
            let q = Quad::new(s.clone(), p.clone(), o.clone(), g.clone());
            return self.members.contains(&q);
        }
        self.quads_matching(pattern).next().is_some()
    }
}

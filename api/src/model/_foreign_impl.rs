use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use quadmodel_term::Term;

use super::*;

// reference implementations

impl<'a, M: QuadModel + ?Sized> QuadModel for &'a M {
    fn quads_matching<'x>(&'x self, pattern: &QuadPattern) -> QuadIter<'x> {
        M::quads_matching(*self, pattern)
    }
    fn count_matching(&self, pattern: &QuadPattern) -> usize {
        M::count_matching(*self, pattern)
    }
    fn estimate(&self, pattern: &QuadPattern) -> usize {
        M::estimate(*self, pattern)
    }
    fn normalize(&self, term: &Term) -> Term {
        M::normalize(*self, term)
    }
    fn len(&self) -> usize {
        M::len(*self)
    }
    fn is_empty(&self) -> bool {
        M::is_empty(*self)
    }
    fn contains_matching(&self, pattern: &QuadPattern) -> bool {
        M::contains_matching(*self, pattern)
    }
}

// NB: this one is required so that &'a mut M can also implement MutableQuadModel
impl<'a, M: QuadModel + ?Sized> QuadModel for &'a mut M {
    fn quads_matching<'x>(&'x self, pattern: &QuadPattern) -> QuadIter<'x> {
        M::quads_matching(&**self, pattern)
    }
    fn count_matching(&self, pattern: &QuadPattern) -> usize {
        M::count_matching(&**self, pattern)
    }
    fn estimate(&self, pattern: &QuadPattern) -> usize {
        M::estimate(&**self, pattern)
    }
    fn normalize(&self, term: &Term) -> Term {
        M::normalize(&**self, term)
    }
    fn len(&self) -> usize {
        M::len(&**self)
    }
    fn is_empty(&self) -> bool {
        M::is_empty(&**self)
    }
    fn contains_matching(&self, pattern: &QuadPattern) -> bool {
        M::contains_matching(&**self, pattern)
    }
}

impl<'a, M: MutableQuadModel + ?Sized> MutableQuadModel for &'a mut M {
    fn insert_pattern(&mut self, pattern: &QuadPattern) -> ModelResult<bool> {
        M::insert_pattern(&mut **self, pattern)
    }
    fn remove_pattern(&mut self, pattern: &QuadPattern) -> ModelResult<bool> {
        M::remove_pattern(&mut **self, pattern)
    }
}

// foreign implementations

/// NB: This is a straightforward implementation with linear scans;
/// a slice is assumed not to contain duplicate quads.
impl QuadModel for [Quad] {
    fn quads_matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a> {
        let pattern = pattern.clone();
        Box::new(self.iter().filter(move |q| pattern.matches(q)).cloned())
    }
}

/// NB: This is a straightforward implementation with linear scans;
/// a vector is assumed not to contain duplicate quads.
impl QuadModel for Vec<Quad> {
    fn quads_matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a> {
        self[..].quads_matching(pattern)
    }
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<S: BuildHasher> QuadModel for HashSet<Quad, S> {
    fn quads_matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a> {
        let pattern = pattern.clone();
        Box::new(self.iter().filter(move |q| pattern.matches(q)).cloned())
    }
    fn len(&self) -> usize {
        HashSet::len(self)
    }
    fn contains_matching(&self, pattern: &QuadPattern) -> bool {
        match exact_quad(pattern) {
            Some(q) => HashSet::contains(self, &q),
            None => self.iter().any(|q| pattern.matches(q)),
        }
    }
}

impl<S: BuildHasher> MutableQuadModel for HashSet<Quad, S> {
    fn insert_pattern(&mut self, pattern: &QuadPattern) -> ModelResult<bool> {
        let (s, p, o, contexts) = insertable(pattern)?;
        let mut changed = false;
        for g in contexts {
            changed |= HashSet::insert(self, Quad::new(s.clone(), p.clone(), o.clone(), g.clone()));
        }
        Ok(changed)
    }

    fn remove_pattern(&mut self, pattern: &QuadPattern) -> ModelResult<bool> {
        if let Some(q) = exact_quad(pattern) {
            return Ok(HashSet::remove(self, &q));
        }
        let before = HashSet::len(self);
        self.retain(|q| !pattern.matches(q));
        Ok(HashSet::len(self) < before)
    }
}

impl QuadModel for BTreeSet<Quad> {
    fn quads_matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a> {
        let pattern = pattern.clone();
        Box::new(self.iter().filter(move |q| pattern.matches(q)).cloned())
    }
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
    fn contains_matching(&self, pattern: &QuadPattern) -> bool {
        match exact_quad(pattern) {
            Some(q) => BTreeSet::contains(self, &q),
            None => self.iter().any(|q| pattern.matches(q)),
        }
    }
}

impl MutableQuadModel for BTreeSet<Quad> {
    fn insert_pattern(&mut self, pattern: &QuadPattern) -> ModelResult<bool> {
        let (s, p, o, contexts) = insertable(pattern)?;
        let mut changed = false;
        for g in contexts {
            changed |= BTreeSet::insert(self, Quad::new(s.clone(), p.clone(), o.clone(), g.clone()));
        }
        Ok(changed)
    }

    fn remove_pattern(&mut self, pattern: &QuadPattern) -> ModelResult<bool> {
        if let Some(q) = exact_quad(pattern) {
            return Ok(BTreeSet::remove(self, &q));
        }
        let before = BTreeSet::len(self);
        self.retain(|q| !pattern.matches(q));
        Ok(BTreeSet::len(self) < before)
    }
}

fn exact_quad(pattern: &QuadPattern) -> Option<Quad> {
    if !pattern.is_exact() {
        return None;
    }
    Some(Quad {
        subject: pattern.subject.clone()?,
        predicate: pattern.predicate.clone()?,
        object: pattern.object.clone()?,
        context: pattern.contexts[0].clone(),
    })
}

//! The value index: a bidirectional association of [terms](Term) with short numeric [identifiers](TermId).
//!
//! Every distinct term value is stored once;
//! the stored instance is the canonical representation of that value for the owning store.
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;

use quadmodel_api::term::{Iri, Term};

use crate::table::{Probe, ProbeTable};

/// The identifier of a term in a [`QuadStore`](crate::QuadStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(u32);

impl TermId {
    /// The identifier of the default graph.
    ///
    /// It is never associated to a term, so it can not collide with any IRI.
    pub const DEFAULT_GRAPH: TermId = TermId(0);

    /// Whether this identifier stands for the default graph.
    pub fn is_default_graph(self) -> bool {
        self == Self::DEFAULT_GRAPH
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u32) -> Self {
        TermId(raw)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    fn entry(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

#[derive(Clone, Debug)]
struct Entry {
    term: Term,
    hash: u64,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct ValueIndex {
    hasher: RandomState,
    // entries[i] has identifier i+1
    entries: Vec<Entry>,
    table: ProbeTable,
}

impl ValueIndex {
    pub fn with_capacity(terms: usize) -> Self {
        ValueIndex {
            hasher: RandomState::new(),
            entries: Vec::with_capacity(terms),
            table: ProbeTable::with_capacity(terms),
        }
    }

    /// The number of interned terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The identifier of `term`, if it was interned.
    pub fn get(&self, term: &Term) -> Option<TermId> {
        let hash = self.hasher.hash_one(term);
        self.table
            .find(hash, |handle| self.same(handle, hash, term))
            .map(TermId)
    }

    /// The identifier of `term`, interning it if necessary.
    pub fn intern(&mut self, term: &Term) -> TermId {
        if let Some(id) = self.get(term) {
            return id;
        }
        let canonical = match term {
            // the datatype of a literal is interned as well,
            // so that all literals of a given datatype share it
            Term::Literal(lit) => Term::Literal(lit.map_datatype(|dt| self.intern_iri(dt))),
            other => other.clone(),
        };
        let hash = self.hasher.hash_one(&canonical);
        let slot = match self
            .table
            .probe(hash, |handle| self.same(handle, hash, &canonical))
        {
            Probe::Vacant(slot) => slot,
            Probe::Found(_, handle) => return TermId(handle),
        };
        self.entries.push(Entry {
            term: canonical,
            hash,
        });
        let id = self.entries.len() as u32;
        if self.table.occupy(slot, id) {
            let entries = &self.entries;
            self.table
                .rebuild(|handle| entries[handle as usize - 1].hash);
        }
        TermId(id)
    }

    fn intern_iri(&mut self, iri: &Iri) -> Iri {
        let id = self.intern(&Term::from(iri));
        match self.term(id) {
            Some(Term::Iri(canonical)) => canonical.clone(),
            _ => iri.clone(),
        }
    }

    /// The canonical term identified by `id`, `None` for the default graph.
    pub fn term(&self, id: TermId) -> Option<&Term> {
        self.entries.get(id.entry()?).map(|e| &e.term)
    }

    fn same(&self, handle: u32, hash: u64, term: &Term) -> bool {
        let entry = &self.entries[handle as usize - 1];
        entry.hash == hash && &entry.term == term
    }
}

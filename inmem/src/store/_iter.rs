use std::collections::VecDeque;

use quadmodel_api::prelude::Quad;

use super::_scan::Scan;
use super::_statements::{StatementIndex, StmtId};
use super::QuadStore;

/// Step through `scans` in order, dropping exhausted ones.
fn next_id(scans: &mut VecDeque<Scan>, index: &StatementIndex) -> Option<StmtId> {
    while let Some(scan) = scans.front_mut() {
        if let Some(id) = scan.next(index) {
            return Some(id);
        }
        scans.pop_front();
    }
    None
}

/// An iterator over the quads of a [`QuadStore`] matching a pattern.
///
/// See [`QuadModel::quads_matching`](quadmodel_api::model::QuadModel::quads_matching).
pub struct MatchingQuads<'a> {
    store: &'a QuadStore,
    scans: VecDeque<Scan>,
}

impl<'a> MatchingQuads<'a> {
    pub(crate) fn new(store: &'a QuadStore, scans: VecDeque<Scan>) -> Self {
        MatchingQuads { store, scans }
    }
}

impl<'a> Iterator for MatchingQuads<'a> {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        loop {
            let id = next_id(&mut self.scans, &self.store.statements)?;
            if let Some(quad) = self.store.quad(id) {
                return Some(quad);
            }
        }
    }
}

/// An iterator over the quads of a [`QuadStore`] matching a pattern,
/// able to remove the current quad from the store.
///
/// Removed quads are only unlinked from the store's indexes
/// when the cursor is dropped.
///
/// ```
/// # use quadmodel_api::prelude::*;
/// # use quadmodel_inmem::QuadStore;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let s = Term::iri("http://example.org/s")?;
/// let p = Term::iri("http://example.org/p")?;
/// let mut store = QuadStore::new();
/// for i in 0..10 {
///     store.insert(&s, &p, &Term::simple_literal(i.to_string()), None)?;
/// }
/// let mut cursor = store.cursor(&QuadPattern::any().with_subject(s.clone()));
/// while let Some(quad) = cursor.next() {
///     let even = quad.object.as_literal()
///         .is_some_and(|lit| lit.lexical_form().parse::<u8>().is_ok_and(|n| n % 2 == 0));
///     if even {
///         cursor.remove_current();
///     }
/// }
/// drop(cursor);
/// assert_eq!(store.len(), 5);
/// # Ok(())
/// # }
/// ```
pub struct QuadCursor<'a> {
    store: &'a mut QuadStore,
    scans: VecDeque<Scan>,
    current: Option<StmtId>,
}

impl<'a> QuadCursor<'a> {
    pub(crate) fn new(store: &'a mut QuadStore, scans: VecDeque<Scan>) -> Self {
        QuadCursor {
            store,
            scans,
            current: None,
        }
    }

    /// Remove the last quad returned by this cursor.
    ///
    /// Returns false if there is no such quad, or if it was already removed.
    pub fn remove_current(&mut self) -> bool {
        match self.current.take() {
            Some(id) => {
                let key = self.store.statements.node(id).key;
                self.store.statements.mark_zombie(&key)
            }
            None => false,
        }
    }
}

impl<'a> Iterator for QuadCursor<'a> {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        loop {
            let id = next_id(&mut self.scans, &self.store.statements)?;
            self.current = Some(id);
            if let Some(quad) = self.store.quad(id) {
                return Some(quad);
            }
        }
    }
}

impl<'a> Drop for QuadCursor<'a> {
    fn drop(&mut self) {
        self.store.statements.maybe_compact();
    }
}

//! The in-memory quad store.
//!
//! A [`QuadStore`] interns every term it receives in a value index,
//! and threads every statement into four positional lists,
//! one under each of its terms.
//! A pattern is scanned by walking the shortest list among its bound terms.
//!
//! Removed statements are only marked as *zombies*;
//! they are physically unlinked in batch
//! once they are at least as many as the live statements.
use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use quadmodel_api::model::insertable;
use quadmodel_api::prelude::*;

use crate::index::{TermId, ValueIndex};

mod _iter;
pub use _iter::*;
mod _scan;
pub use _scan::ScanPlan;
use _scan::{Bound, Scan};
mod _statements;
use _statements::{Key, StatementIndex, StmtId};

/// A mutable, fully indexed, in-memory quad store.
///
/// Mutations require exclusive access.
/// The only operation taking `&self` that may modify the store is
/// [`normalize`](QuadModel::normalize) (which may intern a new term),
/// and it is internally synchronized,
/// so that several threads evaluating queries can share a store.
#[derive(Debug, Default)]
pub struct QuadStore {
    values: RwLock<ValueIndex>,
    statements: StatementIndex,
}

/// Counters describing the state of a [`QuadStore`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// The number of interned terms.
    pub terms: usize,
    /// The number of live statements.
    pub statements: usize,
    /// The number of removed statements not yet unlinked.
    pub zombies: usize,
    /// The number of used slots in the statement table (live statements and tombstones).
    pub statement_slots: usize,
    /// The number of slots in the statement table.
    pub statement_capacity: usize,
    /// The number of compactions performed so far.
    pub compactions: usize,
}

/// The nodes physically linked in the positional list of one term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListStats {
    /// Live statements
    pub live: usize,
    /// Removed statements, waiting for compaction
    pub zombies: usize,
}

impl QuadStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store, presized for the given number of terms and statements.
    pub fn with_capacity(terms: usize, statements: usize) -> Self {
        QuadStore {
            values: RwLock::new(ValueIndex::with_capacity(terms)),
            statements: StatementIndex::with_capacity(statements),
        }
    }

    /// Build a store containing `quads`.
    ///
    /// # Errors
    /// If one of the quads can not be stored (e.g. it has a literal subject).
    pub fn from_quads<I>(quads: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = Quad>,
    {
        let mut store = Self::new();
        store.insert_all(quads)?;
        Ok(store)
    }

    fn values(&self) -> RwLockReadGuard<'_, ValueIndex> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn values_mut(&mut self) -> &mut ValueIndex {
        self.values.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    /// The identifier of `term`, interning it if necessary.
    pub fn intern(&mut self, term: &Term) -> TermId {
        self.values_mut().intern(term)
    }

    /// The identifier of `term`, if it was ever interned in this store.
    pub fn term_id(&self, term: &Term) -> Option<TermId> {
        self.values().get(term)
    }

    /// The canonical term identified by `id`.
    ///
    /// Returns `None` for [`TermId::DEFAULT_GRAPH`]
    /// and for identifiers not issued by this store.
    pub fn term(&self, id: TermId) -> Option<Term> {
        self.values().term(id).cloned()
    }

    /// A cursor over the quads matching `pattern`, able to remove them.
    pub fn cursor(&mut self, pattern: &QuadPattern) -> QuadCursor<'_> {
        let scans = self.scans(pattern);
        QuadCursor::new(self, scans)
    }

    /// Counters describing the state of this store.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            terms: self.values().len(),
            statements: self.statements.len(),
            zombies: self.statements.zombies(),
            statement_slots: self.statements.slots(),
            statement_capacity: self.statements.capacity(),
            compactions: self.statements.compactions(),
        }
    }

    /// How `pattern` would be scanned.
    pub fn plan(&self, pattern: &QuadPattern) -> ScanPlan {
        ScanPlan::new(&self.statements, &self.resolve(pattern))
    }

    /// Walk the positional list of `term` in `position`.
    pub fn list_stats(&self, term: &Term, position: Position) -> ListStats {
        self.term_id(term)
            .map_or_else(ListStats::default, |id| {
                let (live, zombies) = self.statements.walk(id, position);
                ListStats { live, zombies }
            })
    }

    /// Resolve the bound positions of `pattern`, once per graph name.
    ///
    /// Terms unknown to this store can not match anything,
    /// so an empty vector is returned if any of them is bound
    /// (unknown graph names are simply skipped).
    fn resolve(&self, pattern: &QuadPattern) -> Vec<Bound> {
        let values = self.values();
        let mut spo = [None; 3];
        for (i, term) in [&pattern.subject, &pattern.predicate, &pattern.object]
            .into_iter()
            .enumerate()
        {
            if let Some(term) = term {
                match values.get(term) {
                    Some(id) => spo[i] = Some(id),
                    None => return vec![],
                }
            }
        }
        let [s, p, o] = spo;
        if pattern.contexts.is_empty() {
            return vec![[s, p, o, None]];
        }
        let mut bounds: Vec<Bound> = Vec::with_capacity(pattern.contexts.len());
        for name in &pattern.contexts {
            let c = match name {
                None => Some(TermId::DEFAULT_GRAPH),
                Some(term) => values.get(term),
            };
            if let Some(c) = c {
                let bound = [s, p, o, Some(c)];
                if !bounds.contains(&bound) {
                    bounds.push(bound);
                }
            }
        }
        bounds
    }

    fn scans(&self, pattern: &QuadPattern) -> VecDeque<Scan> {
        self.resolve(pattern)
            .into_iter()
            .map(|bound| Scan::new(&self.statements, bound))
            .collect()
    }

    fn quad(&self, id: StmtId) -> Option<Quad> {
        let [s, p, o, c] = self.statements.node(id).key;
        let values = self.values();
        let context = if c.is_default_graph() {
            None
        } else {
            Some(values.term(c)?.clone())
        };
        Some(Quad {
            subject: values.term(s)?.clone(),
            predicate: values.term(p)?.clone(),
            object: values.term(o)?.clone(),
            context,
        })
    }
}

/// The key of a fully bound pattern.
fn exact(bound: &Bound) -> Option<Key> {
    let [s, p, o, c] = *bound;
    Some([s?, p?, o?, c?])
}

impl QuadModel for QuadStore {
    fn quads_matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a> {
        Box::new(MatchingQuads::new(self, self.scans(pattern)))
    }

    fn count_matching(&self, pattern: &QuadPattern) -> usize {
        self.resolve(pattern)
            .into_iter()
            .map(|bound| match exact(&bound) {
                Some(key) => self.statements.find(&key).map_or(0, |_| 1),
                None => {
                    let mut scan = Scan::new(&self.statements, bound);
                    std::iter::from_fn(|| scan.next(&self.statements)).count()
                }
            })
            .sum()
    }

    fn estimate(&self, pattern: &QuadPattern) -> usize {
        self.plan(pattern).candidates
    }

    fn normalize(&self, term: &Term) -> Term {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let id = values.intern(term);
        values.term(id).cloned().unwrap_or_else(|| term.clone())
    }

    fn len(&self) -> usize {
        self.statements.len()
    }

    fn contains_matching(&self, pattern: &QuadPattern) -> bool {
        self.resolve(pattern)
            .into_iter()
            .any(|bound| match exact(&bound) {
                Some(key) => self.statements.find(&key).is_some(),
                None => Scan::new(&self.statements, bound)
                    .next(&self.statements)
                    .is_some(),
            })
    }
}

impl MutableQuadModel for QuadStore {
    fn insert_pattern(&mut self, pattern: &QuadPattern) -> ModelResult<bool> {
        let (s, p, o, contexts) = insertable(pattern)?;
        let values = self.values_mut();
        let s = values.intern(s);
        let p = values.intern(p);
        let o = values.intern(o);
        let keys: Vec<Key> = contexts
            .iter()
            .map(|name| {
                let c = name
                    .as_ref()
                    .map_or(TermId::DEFAULT_GRAPH, |g| values.intern(g));
                [s, p, o, c]
            })
            .collect();
        let mut changed = false;
        for key in keys {
            changed |= self.statements.insert(key);
        }
        Ok(changed)
    }

    fn remove_pattern(&mut self, pattern: &QuadPattern) -> ModelResult<bool> {
        if pattern.is_wildcard() {
            let changed = self.statements.len() > 0;
            self.statements.reset();
            return Ok(changed);
        }
        let bounds = self.resolve(pattern);
        let keys: Option<Vec<Key>> = bounds.iter().map(exact).collect();
        if let Some(keys) = keys {
            let mut changed = false;
            for key in keys {
                changed |= self.statements.remove(&key);
            }
            return Ok(changed);
        }
        let mut cursor = self.cursor(pattern);
        let mut changed = false;
        while cursor.next().is_some() {
            changed |= cursor.remove_current();
        }
        Ok(changed)
    }

    fn retain_matching<F>(&mut self, pattern: &QuadPattern, mut keep: F) -> ModelResult<usize>
    where
        F: FnMut(&Quad) -> bool,
        Self: Sized,
    {
        let mut cursor = self.cursor(pattern);
        let mut removed = 0;
        while let Some(quad) = cursor.next() {
            if !keep(&quad) && cursor.remove_current() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

impl Extend<Quad> for QuadStore {
    /// Quads that can not be stored (e.g. with a literal subject) are skipped.
    fn extend<I: IntoIterator<Item = Quad>>(&mut self, quads: I) {
        for quad in quads {
            if let Err(err) = self.insert_quad(&quad) {
                log::warn!("skipping {quad}: {err}");
            }
        }
    }
}

impl FromIterator<Quad> for QuadStore {
    /// Quads that can not be stored (e.g. with a literal subject) are skipped.
    fn from_iter<I: IntoIterator<Item = Quad>>(quads: I) -> Self {
        let mut store = Self::new();
        store.extend(quads);
        store
    }
}

#[cfg(test)]
quadmodel_api::test_quad_model_impl!(test_model, QuadStore);

#[cfg(test)]
mod test {
    use super::*;
    use quadmodel_api::model::test::*;
    use test_case::test_case;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn store() -> QuadStore {
        some_quads().into_iter().collect()
    }

    #[test]
    fn single_statement_in_default_graph() -> TestResult {
        let mut store = QuadStore::new();
        let (a, p, b) = (ex("a"), ex("p"), ex("b"));
        assert!(store.insert(&a, &p, &b, None)?);
        assert_eq!(store.len(), 1);
        let found: Vec<Quad> = store
            .quads_matching(&QuadPattern::any().with_subject(a.clone()))
            .collect();
        assert_eq!(found, vec![Quad::new(a, p, b, None)]);
        assert_eq!(found[0].context, None);
        Ok(())
    }

    #[test]
    fn remove_one_of_two() -> TestResult {
        let mut store = QuadStore::new();
        let (a, p, b, c, g1) = (ex("a"), ex("p"), ex("b"), ex("c"), ex("g1"));
        store.insert(&a, &p, &b, Some(&g1))?;
        store.insert(&a, &p, &c, Some(&g1))?;
        assert!(store.remove(&a, &p, &b, Some(&g1))?);
        assert_eq!(store.len(), 1);
        assert!(store.contains(&a, &p, &c, Some(&g1)));
        assert!(!store.contains(&a, &p, &b, Some(&g1)));
        Ok(())
    }

    #[test]
    fn compaction_after_mass_removal() -> TestResult {
        init_logger();
        let mut store = QuadStore::new();
        let (s, p) = (ex("s"), ex("p"));
        let objects: Vec<Term> = (0..1000).map(|i| ex(&format!("o{i}"))).collect();
        for o in &objects {
            store.insert(&s, &p, o, None)?;
        }
        assert_eq!(store.list_stats(&s, Position::Subject).live, 1000);
        for o in &objects[..999] {
            assert!(store.remove(&s, &p, o, None)?);
        }
        let stats = store.stats();
        assert_eq!(stats.statements, 1);
        assert!(stats.compactions >= 1);
        assert!(stats.statement_slots >= stats.statements);
        assert_eq!(
            store.list_stats(&s, Position::Subject),
            ListStats {
                live: 1,
                zombies: 0
            }
        );
        assert!(store.contains(&s, &p, &objects[999], None));
        Ok(())
    }

    #[test]
    fn zombies_are_invisible() -> TestResult {
        let mut store = QuadStore::new();
        let (s, p) = (ex("s"), ex("p"));
        for i in 0..10 {
            store.insert(&s, &p, &ex(&format!("o{i}")), None)?;
        }
        assert!(store.remove(&s, &p, &ex("o3"), None)?);
        assert_eq!(
            store.list_stats(&s, Position::Subject),
            ListStats {
                live: 9,
                zombies: 1
            }
        );
        assert_eq!(store.stats().zombies, 1);
        assert_eq!(store.count_matching(&QuadPattern::any().with_subject(s.clone())), 9);
        assert_eq!(store.quads().count(), 9);
        assert!(!store.contains(&s, &p, &ex("o3"), None));
        // re-adding does not resurrect the zombie
        assert!(store.insert(&s, &p, &ex("o3"), None)?);
        assert_eq!(store.len(), 10);
        assert_eq!(store.list_stats(&ex("o3"), Position::Object).live, 1);
        assert_eq!(store.list_stats(&ex("o3"), Position::Object).zombies, 1);
        Ok(())
    }

    #[test]
    fn interning_is_unique() -> TestResult {
        let mut store = QuadStore::new();
        let a1 = ex("a");
        let a2 = ex("a");
        assert!(!a1.same_as(&a2));
        store.insert(&a1, &a1, &a1, None)?;
        let n1 = store.normalize(&a1);
        let n2 = store.normalize(&a2);
        assert!(n1.same_as(&n2));
        assert_eq!(store.intern(&a2), store.term_id(&a1).unwrap());
        let stored = store.quads().next().unwrap();
        assert!(stored.subject.same_as(&n2));
        assert!(stored.predicate.same_as(&stored.object));
        Ok(())
    }

    #[test]
    fn normalize_interns() {
        let store = QuadStore::new();
        let t = Term::lang_literal("chat", "fr").unwrap();
        assert_eq!(store.term_id(&t), None);
        let n = store.normalize(&t);
        assert_eq!(n, t);
        assert!(store.term_id(&t).is_some());
        assert!(store.normalize(&t).same_as(&n));
        assert!(store.is_empty());
    }

    #[test]
    fn normalize_is_shared() -> TestResult {
        let store = QuadStore::new();
        let terms: Vec<Term> = (0..100).map(|i| ex(&format!("t{i}"))).collect();
        let normalized: Vec<Vec<Term>> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| terms.iter().map(|t| store.normalize(t)).collect::<Vec<_>>()))
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });
        assert_eq!(store.stats().terms, 100);
        for run in &normalized[1..] {
            assert!(run.iter().zip(&normalized[0]).all(|(t1, t2)| t1.same_as(t2)));
        }
        Ok(())
    }

    #[test_case(QuadPattern::any(), vec![None], 10; "nothing bound")]
    #[test_case(QuadPattern::any().with_subject(I1.clone()), vec![Some(Position::Subject)], 3; "subject")]
    #[test_case(
        QuadPattern::any().with_subject(I1.clone()).with_predicate(LABEL.clone()),
        vec![Some(Position::Predicate)], 2;
        "predicate more selective"
    )]
    #[test_case(
        QuadPattern::any().with_predicate(TYPE.clone()).with_object(C1.clone()),
        vec![Some(Position::Object)], 2;
        "object more selective"
    )]
    #[test_case(
        QuadPattern::any().with_subject(C2.clone()).with_context(GN1.clone()),
        vec![Some(Position::Subject)], 2;
        "tie between subject and context"
    )]
    #[test_case(
        QuadPattern::any().with_predicate(TYPE.clone()).with_context(GN1.clone()).with_context(GN2.clone()),
        vec![Some(Position::Context), Some(Position::Predicate)], 7;
        "one scan per graph"
    )]
    #[test_case(QuadPattern::any().with_object(ex("unknown")), vec![], 0; "unknown term")]
    fn planning(pattern: QuadPattern, roots: Vec<Option<Position>>, candidates: usize) {
        let store = store();
        let plan = store.plan(&pattern);
        assert_eq!(plan.roots, roots);
        assert_eq!(plan.candidates, candidates);
        assert_eq!(store.estimate(&pattern), candidates);
        assert!(store.count_matching(&pattern) <= candidates);
    }

    #[test]
    fn selectivity_bounds_scans() {
        let store = store();
        for pattern in some_patterns() {
            let expected = expected_matches(&some_quads(), &pattern).len();
            let plan = store.plan(&pattern);
            assert!(expected <= plan.candidates, "{pattern}");
            let mut scanned = 0;
            for bound in store.resolve(&pattern) {
                let mut scan = Scan::new(&store.statements, bound);
                while scan.next(&store.statements).is_some() {}
                scanned += scan.scanned();
            }
            assert!(scanned <= plan.candidates, "{pattern}");
        }
    }

    #[test]
    fn cursor_removes_current_only() -> TestResult {
        let mut store = store();
        let mut cursor = store.cursor(&QuadPattern::any().with_context(GN2.clone()));
        assert!(!cursor.remove_current());
        let mut seen = 0;
        while cursor.next().is_some() {
            seen += 1;
            if seen % 2 == 1 {
                assert!(cursor.remove_current());
                assert!(!cursor.remove_current());
            }
        }
        drop(cursor);
        assert_eq!(seen, 5);
        assert_eq!(store.count_matching(&QuadPattern::any().with_context(GN2.clone())), 2);
        assert_eq!(store.len(), 7);
        Ok(())
    }

    #[test]
    fn wildcard_removal_compacts_once() -> TestResult {
        let mut store = QuadStore::new();
        let (s, p) = (ex("s"), ex("p"));
        for i in 0..100 {
            store.insert(&s, &p, &ex(&format!("o{i}")), None)?;
        }
        store.insert(&p, &p, &s, None)?;
        assert!(store.remove_pattern(&QuadPattern::any().with_subject(s.clone()))?);
        let stats = store.stats();
        assert_eq!(stats.statements, 1);
        assert_eq!(stats.zombies, 0);
        assert_eq!(stats.compactions, 1);
        assert_eq!(store.list_stats(&p, Position::Predicate), ListStats { live: 1, zombies: 0 });
        Ok(())
    }

    #[test]
    fn reset_keeps_terms() -> TestResult {
        init_logger();
        let mut store = store();
        let terms = store.stats().terms;
        assert!(store.clear()?);
        let stats = store.stats();
        assert_eq!(stats.statements, 0);
        assert_eq!(stats.terms, terms);
        assert!(store.term_id(&C1).is_some());
        assert_eq!(store.list_stats(&C1, Position::Subject), ListStats::default());
        assert_eq!(store.insert_all(some_quads())?, some_quads().len());
        Ok(())
    }

    #[test]
    fn default_graph_is_not_an_iri() -> TestResult {
        let mut store = store();
        for q in store.quads_matching(&QuadPattern::any().in_default_graph()) {
            assert_eq!(q.context, None);
        }
        assert_eq!(store.term(TermId::DEFAULT_GRAPH), None);
        let id = store.intern(&C1);
        assert!(!id.is_default_graph());
        assert_eq!(store.term(id), Some(C1.clone()));
        Ok(())
    }

    #[test]
    fn invalid_quads_are_skipped_when_collecting() {
        let mut quads = some_quads();
        quads.push(Quad::new(L1.clone(), TYPE.clone(), C1.clone(), None));
        let store: QuadStore = quads.clone().into_iter().collect();
        assert_eq!(store.len(), some_quads().len());
        assert!(QuadStore::from_quads(quads).is_err());
    }

    #[test]
    fn presized() -> TestResult {
        let mut store = QuadStore::with_capacity(1000, 1000);
        let capacity = store.stats().statement_capacity;
        assert!(capacity * 2 > 1000 * 3);
        for i in 0..1000 {
            store.insert(&ex(&format!("s{i}")), &TYPE, &CLASS, None)?;
        }
        assert_eq!(store.stats().statement_capacity, capacity);
        Ok(())
    }

    #[test]
    fn churn_keeps_table_small() -> TestResult {
        let mut store = QuadStore::new();
        let (s, p) = (ex("s"), ex("p"));
        for i in 0..5000 {
            let o = ex(&format!("o{i}"));
            store.insert(&s, &p, &o, None)?;
            store.remove(&s, &p, &o, None)?;
        }
        let stats = store.stats();
        assert_eq!(stats.statements, 0);
        assert_eq!(stats.statement_capacity, crate::table::INITIAL_CAPACITY);
        Ok(())
    }

    #[cfg(feature = "all_tests")]
    #[test]
    fn big_store() -> TestResult {
        const N: usize = 200;
        let mut store = QuadStore::new();
        let subjects: Vec<Term> = (0..N).map(|i| ex(&format!("s{i}"))).collect();
        for s in &subjects {
            for o in &subjects[..N / 4] {
                store.insert(s, &P1, o, Some(&G1))?;
            }
        }
        assert_eq!(store.len(), N * N / 4);
        assert!(store.remove_pattern(&QuadPattern::any().with_object(subjects[0].clone()))?);
        assert_eq!(store.len(), N * N / 4 - N);
        let removed = store.retain_matching(&QuadPattern::any(), |q| q.subject != subjects[1])?;
        assert_eq!(removed, N / 4 - 1);
        Ok(())
    }
}

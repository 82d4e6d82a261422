//! The statement index: an arena of statement nodes,
//! an open-addressed table over their keys,
//! and the positional lists threading them under each of their terms.
use quadmodel_api::prelude::Position;

use crate::index::TermId;
use crate::table::{Probe, ProbeTable};

pub(crate) type StmtId = u32;

/// The identifiers of the subject, predicate, object and context of a statement.
pub(crate) type Key = [TermId; 4];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodeState {
    Live,
    /// Logically removed, but still linked in its positional lists.
    Zombie,
    /// Unlinked, waiting in the free list.
    Vacant,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub key: Key,
    pub next: [Option<StmtId>; 4],
    pub state: NodeState,
}

impl Node {
    pub fn is_live(&self) -> bool {
        self.state == NodeState::Live
    }

    /// Whether this node agrees with every bound position of `bound`.
    pub fn matches(&self, bound: &[Option<TermId>; 4]) -> bool {
        self.key
            .iter()
            .zip(bound)
            .all(|(t, b)| b.map_or(true, |b| b == *t))
    }
}

/// The heads and live counts of the four positional lists of one term.
#[derive(Clone, Debug, Default)]
pub(crate) struct TermLinks {
    heads: [Option<StmtId>; 4],
    counts: [usize; 4],
}

#[derive(Clone, Debug, Default)]
pub(crate) struct StatementIndex {
    nodes: Vec<Node>,
    free: Vec<StmtId>,
    table: ProbeTable,
    // indexed by TermId
    links: Vec<TermLinks>,
    live: usize,
    zombies: usize,
    compactions: usize,
}

fn hash(key: &Key) -> u64 {
    let [s, p, o, c] = key.map(|t| t.index() as u64);
    6661u64
        .wrapping_mul(s)
        .wrapping_add(961u64.wrapping_mul(p))
        .wrapping_add(31u64.wrapping_mul(o))
        .wrapping_add(c)
        // spread consecutive identifiers over the table
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        >> 16
}

impl StatementIndex {
    pub fn with_capacity(statements: usize) -> Self {
        StatementIndex {
            nodes: Vec::with_capacity(statements),
            table: ProbeTable::with_capacity(statements),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn zombies(&self) -> usize {
        self.zombies
    }

    pub fn compactions(&self) -> usize {
        self.compactions
    }

    pub fn slots(&self) -> usize {
        self.table.used()
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn node(&self, id: StmtId) -> &Node {
        &self.nodes[id as usize]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The head of the list of statements having `term` in `position`.
    pub fn head(&self, term: TermId, position: Position) -> Option<StmtId> {
        self.links
            .get(term.index())
            .and_then(|l| l.heads[position.index()])
    }

    /// The number of live statements having `term` in `position`.
    pub fn count(&self, term: TermId, position: Position) -> usize {
        self.links
            .get(term.index())
            .map_or(0, |l| l.counts[position.index()])
    }

    fn probe(&self, key: &Key) -> Probe {
        self.table
            .probe(hash(key), |id| self.nodes[id as usize].key == *key)
    }

    pub fn find(&self, key: &Key) -> Option<StmtId> {
        match self.probe(key) {
            Probe::Found(_, id) => Some(id),
            Probe::Vacant(_) => None,
        }
    }

    /// Add the statement `key`, returning false if it was already present.
    pub fn insert(&mut self, key: Key) -> bool {
        let slot = match self.probe(&key) {
            Probe::Found(..) => return false,
            Probe::Vacant(slot) => slot,
        };
        let id = self.allocate(key);
        for (i, term) in key.iter().enumerate() {
            let links = self.links_mut(*term);
            links.counts[i] += 1;
            let next = links.heads[i].replace(id);
            self.nodes[id as usize].next[i] = next;
        }
        self.live += 1;
        if self.table.occupy(slot, id) {
            let nodes = &self.nodes;
            self.table.rebuild(|id| hash(&nodes[id as usize].key));
        }
        true
    }

    fn allocate(&mut self, key: Key) -> StmtId {
        let node = Node {
            key,
            next: [None; 4],
            state: NodeState::Live,
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id as usize] = node;
                id
            }
            None => {
                self.nodes.push(node);
                (self.nodes.len() - 1) as StmtId
            }
        }
    }

    fn links_mut(&mut self, term: TermId) -> &mut TermLinks {
        let i = term.index();
        if i >= self.links.len() {
            self.links.resize_with(i + 1, TermLinks::default);
        }
        &mut self.links[i]
    }

    /// Remove the statement `key`, compacting the lists if enough zombies accumulated.
    pub fn remove(&mut self, key: &Key) -> bool {
        let removed = self.mark_zombie(key);
        if removed {
            self.maybe_compact();
        }
        removed
    }

    /// Logically remove the statement `key`,
    /// leaving its node linked in its positional lists.
    pub fn mark_zombie(&mut self, key: &Key) -> bool {
        let (slot, id) = match self.probe(key) {
            Probe::Found(slot, id) => (slot, id),
            Probe::Vacant(_) => return false,
        };
        self.table.vacate(slot);
        self.nodes[id as usize].state = NodeState::Zombie;
        for (i, term) in key.iter().enumerate() {
            self.links_mut(*term).counts[i] -= 1;
        }
        self.live -= 1;
        self.zombies += 1;
        true
    }

    /// Compact if zombies are at least as many as live statements.
    pub fn maybe_compact(&mut self) {
        if self.zombies > 0 && self.zombies >= self.live {
            self.compact();
        }
    }

    /// Unlink every zombie from every positional list, and recycle their nodes.
    pub fn compact(&mut self) {
        let nodes = &mut self.nodes;
        for links in self.links.iter_mut() {
            for i in 0..4 {
                let mut prev: Option<StmtId> = None;
                let mut cursor = links.heads[i];
                while let Some(id) = cursor {
                    let next = nodes[id as usize].next[i];
                    if nodes[id as usize].state == NodeState::Zombie {
                        match prev {
                            None => links.heads[i] = next,
                            Some(p) => nodes[p as usize].next[i] = next,
                        }
                    } else {
                        prev = Some(id);
                    }
                    cursor = next;
                }
            }
        }
        for (id, node) in nodes.iter_mut().enumerate() {
            if node.state == NodeState::Zombie {
                node.state = NodeState::Vacant;
                self.free.push(id as StmtId);
            }
        }
        log::debug!(
            "compacted {} zombies, {} live statements remain",
            self.zombies,
            self.live
        );
        self.zombies = 0;
        self.compactions += 1;
    }

    /// Remove every statement, keeping the interned terms.
    pub fn reset(&mut self) {
        log::debug!("reset statement index ({} live statements)", self.live);
        self.nodes.clear();
        self.free.clear();
        self.table.clear();
        self.links.iter_mut().for_each(|l| *l = TermLinks::default());
        self.live = 0;
        self.zombies = 0;
    }

    /// Walk the list of `term` in `position`, counting live and zombie nodes.
    pub fn walk(&self, term: TermId, position: Position) -> (usize, usize) {
        let i = position.index();
        let mut cursor = self.head(term, position);
        let (mut live, mut zombies) = (0, 0);
        while let Some(id) = cursor {
            let node = self.node(id);
            if node.is_live() {
                live += 1;
            } else {
                zombies += 1;
            }
            cursor = node.next[i];
        }
        (live, zombies)
    }
}

//! The selectivity planner, and the scans it drives.
use quadmodel_api::prelude::Position;

use super::_statements::{StatementIndex, StmtId};
use crate::index::TermId;

/// The bound positions of a pattern, resolved to term identifiers,
/// in [`Position::ALL`] order.
pub(crate) type Bound = [Option<TermId>; 4];

/// How a pattern is going to be scanned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanPlan {
    /// One scan root per graph name to scan, `None` meaning a full scan.
    /// An empty vector means that the pattern can not match anything.
    pub roots: Vec<Option<Position>>,
    /// An upper bound on the number of live statements visited by the scans.
    pub candidates: usize,
}

impl ScanPlan {
    pub(crate) fn new<'a, I>(index: &StatementIndex, bounds: I) -> Self
    where
        I: IntoIterator<Item = &'a Bound>,
    {
        let mut roots = vec![];
        let mut candidates = 0;
        for bound in bounds {
            match select_root(index, bound) {
                Some((position, count)) => {
                    roots.push(Some(position));
                    candidates += count;
                }
                None => {
                    roots.push(None);
                    candidates += index.len();
                }
            }
        }
        ScanPlan { roots, candidates }
    }
}

/// The bound position with the fewest live statements, and that number.
///
/// Ties are broken in favour of the first position in [`Position::ALL`].
pub(crate) fn select_root(index: &StatementIndex, bound: &Bound) -> Option<(Position, usize)> {
    let mut best: Option<(Position, usize)> = None;
    for position in Position::ALL {
        if let Some(term) = bound[position.index()] {
            let count = index.count(term, position);
            if best.map_or(true, |(_, min)| count < min) {
                best = Some((position, count));
            }
        }
    }
    best
}

#[derive(Clone, Copy, Debug)]
enum Walk {
    // position index, next node
    List(usize, Option<StmtId>),
    // next node in the arena
    Arena(usize),
}

/// A scan of the live statements matching a [`Bound`].
///
/// A scan does not borrow the index:
/// it is given it at every step,
/// so that statements can be removed between two steps.
/// The next node is always read before the current one is returned,
/// and removed statements stay linked until compaction,
/// so removing the current statement never disturbs the scan.
#[derive(Clone, Debug)]
pub(crate) struct Scan {
    bound: Bound,
    walk: Walk,
    scanned: usize,
}

impl Scan {
    pub fn new(index: &StatementIndex, bound: Bound) -> Self {
        let walk = match select_root(index, &bound) {
            Some((position, count)) => {
                log::trace!("scan root: {position} ({count} candidates)");
                let i = position.index();
                Walk::List(i, bound[i].and_then(|t| index.head(t, position)))
            }
            None => {
                log::trace!("scan root: full scan ({} candidates)", index.len());
                Walk::Arena(0)
            }
        };
        Scan {
            bound,
            walk,
            scanned: 0,
        }
    }

    /// The next live statement matching this scan.
    pub fn next(&mut self, index: &StatementIndex) -> Option<StmtId> {
        loop {
            let step = match &mut self.walk {
                Walk::List(i, next) => {
                    let current = *next;
                    if let Some(id) = current {
                        *next = index.node(id).next[*i];
                    }
                    current
                }
                Walk::Arena(next) if *next < index.node_count() => {
                    *next += 1;
                    Some((*next - 1) as StmtId)
                }
                Walk::Arena(_) => None,
            };
            let Some(id) = step else {
                log::trace!("scan done: {} candidates visited", self.scanned);
                return None;
            };
            let node = index.node(id);
            if node.is_live() {
                self.scanned += 1;
                // the scan root is checked again, like every bound position
                if node.matches(&self.bound) {
                    return Some(id);
                }
            }
        }
    }

    /// The number of live statements visited so far, matching or not.
    #[cfg(test)]
    pub fn scanned(&self) -> usize {
        self.scanned
    }
}

//! Best-first search machinery shared by the informed solvers: a binary heap frontier with
//! stable tie-breaking, and a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! that keeps its nodes in an [IndexMap] and skips stale heap entries lazily.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::warn;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

pub(crate) struct SmallestCostHolder<K> {
    pub estimated_cost: K,
    pub cost: K,
    pub index: usize,
    sequence: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.sequence == other.sequence
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimate first; among equal estimates the entry pushed first wins, so the
        // heap behaves like a stable priority queue.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Min-priority frontier over node indices. Duplicate entries for the same index are allowed,
/// callers discard the ones they no longer care about when popping.
pub(crate) struct PriorityFrontier<K> {
    heap: BinaryHeap<SmallestCostHolder<K>>,
    pushed: usize,
}

impl<K: Ord> PriorityFrontier<K> {
    pub fn new() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            pushed: 0,
        }
    }
    pub fn push(&mut self, estimated_cost: K, cost: K, index: usize) {
        self.heap.push(SmallestCostHolder {
            estimated_cost,
            cost,
            index,
            sequence: self.pushed,
        });
        self.pushed += 1;
    }
    /// Queues `index` by its estimate alone, for searches that do not track a path cost.
    pub fn push_estimate(&mut self, estimated_cost: K, index: usize)
    where
        K: Zero,
    {
        self.push(estimated_cost, K::zero(), index);
    }
    pub fn pop(&mut self) -> Option<SmallestCostHolder<K>> {
        self.heap.pop()
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

pub(crate) fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// A* from `start` until `success` holds. Returns the path, both ends included, and its cost.
///
/// A successor is (re-)queued when it has not been seen before or when it is reached with a
/// strictly smaller cost than recorded. Entries of closed nodes and entries whose cost is
/// outdated are skipped when popped.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = PriorityFrontier::new();
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    let mut closed: FxHashSet<usize> = FxHashSet::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    to_see.push(heuristic(start), Zero::zero(), 0);
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let (node, &(_, c)) = parents.get_index(index)?;
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return Some((path, cost));
            }
            // We may have inserted a node several times into the heap if we found a better
            // way to reach it. Only expand the entry carrying the best known cost, once.
            if cost > c || !closed.insert(index) {
                continue;
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if !closed.contains(&e.index()) && e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(new_cost + h, new_cost, n);
        }
    }
    warn!("A* exhausted its frontier without reaching the goal");
    None
}

//! This module implements a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! in which the frontier is a plain list scanned for the lowest estimated cost. Ties are broken
//! in favour of the entry that was inserted first, which makes the returned path among several
//! equal-cost ones reproducible. The goal test is applied to successors as they are generated.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use itertools::Itertools;
use num_traits::Zero;

use log::debug;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

const ROOT: usize = usize::MAX;

/// A tentative visit of a node. Several search nodes may refer to the same node at different
/// tentative costs; the node itself is their identity for frontier and closed set membership.
#[derive(Clone, Debug)]
struct SearchNode<N, C> {
    node: N,
    /// Cost from the start (g).
    cost: C,
    /// Cost from the start plus heuristic estimate to the goal (f).
    estimated_cost: C,
    /// Arena index of the parent, [usize::MAX] for the root.
    parent: usize,
}

/// Reusable buffers for [astar_linear](SearchContext::astar_linear). Nodes live in an arena and
/// refer to their parent by index.
#[derive(Clone, Debug)]
pub struct SearchContext<N, C> {
    arena: Vec<SearchNode<N, C>>,
    open: Vec<usize>,
    closed: FxIndexMap<N, C>,
}

impl<N, C> Default for SearchContext<N, C> {
    fn default() -> Self {
        SearchContext {
            arena: Vec::new(),
            open: Vec::new(),
            closed: FxIndexMap::default(),
        }
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.arena.clear();
        self.open.clear();
        self.closed.clear();
    }

    /// Number of distinct nodes that were fully expanded by the last search.
    pub fn expanded(&self) -> usize {
        self.closed.len()
    }

    /// Walks the parent chain from `ix` back to, but not including, the root.
    fn reverse_path(&self, mut ix: usize) -> Vec<(N, C)> {
        let mut path = Vec::new();
        while ix != ROOT && self.arena[ix].parent != ROOT {
            let search_node = &self.arena[ix];
            path.push((search_node.node.clone(), search_node.cost));
            ix = search_node.parent;
        }
        path.reverse();
        path
    }

    fn push_node(&mut self, node: N, cost: C, estimated_cost: C, parent: usize) -> usize {
        self.arena.push(SearchNode {
            node,
            cost,
            estimated_cost,
            parent,
        });
        self.arena.len() - 1
    }

    /// Searches from `start` until a successor satisfies `success`. Returns the nodes after
    /// the start up to and including the goal, each with its cost from the start, and the
    /// total cost. If the start itself satisfies `success`, the path is empty.
    pub fn astar_linear<FN, IN, FH, FS>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
    ) -> Option<(Vec<(N, C)>, C)>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        self.reset();
        if success(start) {
            return Some((Vec::new(), Zero::zero()));
        }
        let h = heuristic(start);
        let root = self.push_node(start.clone(), Zero::zero(), h, ROOT);
        self.open.push(root);
        loop {
            let Some(position) = self
                .open
                .iter()
                .position_min_by_key(|&&ix| self.arena[ix].estimated_cost)
            else {
                break;
            };
            let current = self.open.remove(position);
            let (node, cost, estimated_cost) = {
                let search_node = &self.arena[current];
                (
                    search_node.node.clone(),
                    search_node.cost,
                    search_node.estimated_cost,
                )
            };
            for (successor, move_cost) in successors(&node) {
                let new_cost = cost + move_cost;
                if success(&successor) {
                    let goal = self.push_node(successor, new_cost, new_cost, current);
                    debug!(
                        "Goal reached after expanding {} nodes",
                        self.closed.len() + 1
                    );
                    return Some((self.reverse_path(goal), new_cost));
                }
                let new_estimated_cost = new_cost + heuristic(&successor);
                // An equal or better tentative visit already covers this node
                let in_open = self.open.iter().any(|&ix| {
                    let other = &self.arena[ix];
                    other.node == successor && other.estimated_cost <= new_estimated_cost
                });
                if in_open {
                    continue;
                }
                if let Some(&closed_cost) = self.closed.get(&successor) {
                    if closed_cost <= new_estimated_cost {
                        continue;
                    }
                }
                let n = self.push_node(successor, new_cost, new_estimated_cost, current);
                self.open.push(n);
            }
            match self.closed.entry(node) {
                Occupied(mut e) => {
                    if *e.get() > estimated_cost {
                        e.insert(estimated_cost);
                    }
                }
                Vacant(e) => {
                    e.insert(estimated_cost);
                }
            }
        }
        debug!(
            "Frontier exhausted after expanding {} nodes",
            self.closed.len()
        );
        None
    }
}

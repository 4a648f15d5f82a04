use std::collections::VecDeque;

use revpref_core::errors::RpError;

use crate::relation::Relation;

/// Capability of answering reachability queries on a fixed node set.
pub trait Reachability {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Returns whether a path of length at least one leads from `from` to `to`.
    fn reachable(&self, from: usize, to: usize) -> bool;

    /// Nodes `j` such that `node` reaches `j` and `j` reaches `node`.
    fn mutually_reachable(&self, node: usize) -> Vec<usize> {
        (0..self.node_count())
            .filter(|&other| self.reachable(node, other) && self.reachable(other, node))
            .collect()
    }
}

/// Unweighted directed graph on nodes `0..n`, self-loops allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiGraph {
    adjacency: Relation,
}

impl DiGraph {
    /// Creates a graph with `nodes` nodes and no edges.
    pub fn new(nodes: usize) -> Self {
        Self {
            adjacency: Relation::empty(nodes),
        }
    }

    /// Creates a graph with an edge `i → j` for every pair of `relation`.
    pub fn from_relation(relation: &Relation) -> Self {
        Self {
            adjacency: relation.clone(),
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.size()
    }

    /// Number of edges, self-loops included.
    pub fn edge_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Inserts the edge `from → to`; inserting an existing edge is a no-op.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<(), RpError> {
        self.ensure_node(from)?;
        self.ensure_node(to)?;
        self.adjacency.insert(from, to);
        Ok(())
    }

    /// Iterates over edges in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.pairs()
    }

    /// Nodes reachable from `start` by a path of length at least one, by breadth-first search.
    pub fn reachable_from(&self, start: usize) -> Result<Vec<bool>, RpError> {
        self.ensure_node(start)?;
        let mut seen = vec![false; self.node_count()];
        let mut queue: VecDeque<usize> = self.adjacency.successors(start).collect();
        while let Some(node) = queue.pop_front() {
            if seen[node] {
                continue;
            }
            seen[node] = true;
            queue.extend(self.adjacency.successors(node).filter(|&next| !seen[next]));
        }
        Ok(seen)
    }

    /// Computes the transitive closure with a bit-parallel Warshall sweep.
    pub fn transitive_closure(&self) -> TransitiveClosure {
        let mut closure = self.adjacency.clone();
        let nodes = closure.size();
        for via in 0..nodes {
            for from in 0..nodes {
                if closure.contains(from, via) {
                    closure.union_rows(from, via);
                }
            }
        }
        TransitiveClosure { relation: closure }
    }

    fn ensure_node(&self, node: usize) -> Result<(), RpError> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(RpError::graph("node-out-of-range", "node index is not part of the graph")
                .with_context("node", node)
                .with_context("nodes", self.node_count()))
        }
    }
}

/// Transitive closure of a [`DiGraph`].
///
/// Contains `(i, i)` only when `i` lies on a cycle (or carries a self-loop).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitiveClosure {
    relation: Relation,
}

impl TransitiveClosure {
    /// Returns the closure as a relation.
    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    /// Iterates over the closure's edges in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.relation.pairs()
    }
}

impl Reachability for TransitiveClosure {
    fn node_count(&self) -> usize {
        self.relation.size()
    }

    fn reachable(&self, from: usize, to: usize) -> bool {
        self.relation.contains(from, to)
    }
}

use revpref_core::errors::RpError;
use serde::{Deserialize, Serialize};

/// Directed edge carrying a finite weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    /// Tail node.
    pub from: usize,
    /// Head node.
    pub to: usize,
    /// Edge weight.
    pub weight: f64,
}

/// Cycle whose total weight is negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegativeCycle {
    /// Nodes in traversal order; the cycle closes from the last node back to the first.
    pub nodes: Vec<usize>,
    /// Sum of the edge weights along the cycle.
    pub weight: f64,
}

/// Outcome of a negative-cycle search.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleSearch {
    /// Shortest paths are well defined everywhere.
    NoNegativeCycle,
    /// A negative cycle was isolated.
    NegativeCycle(NegativeCycle),
    /// Distances kept decreasing but no closed predecessor cycle could be isolated.
    Unbounded,
}

impl CycleSearch {
    /// Returns true only when the search proved there is no negative cycle.
    pub fn is_acyclic(&self) -> bool {
        matches!(self, CycleSearch::NoNegativeCycle)
    }

    /// Returns the isolated cycle, if any.
    pub fn cycle(&self) -> Option<&NegativeCycle> {
        match self {
            CycleSearch::NegativeCycle(cycle) => Some(cycle),
            _ => None,
        }
    }
}

/// Capability of detecting negative-weight cycles.
pub trait NegativeCycleDetection {
    /// Searches for a negative cycle; relaxations must improve a distance by more
    /// than `tolerance` to count.
    fn find_negative_cycle(&self, tolerance: f64) -> CycleSearch;

    /// Returns whether some cycle has negative total weight.
    fn has_negative_cycle(&self, tolerance: f64) -> bool {
        !self.find_negative_cycle(tolerance).is_acyclic()
    }
}

/// Directed graph with finite real edge weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedDigraph {
    nodes: usize,
    edges: Vec<WeightedEdge>,
}

impl WeightedDigraph {
    /// Creates a graph with `nodes` nodes and no edges.
    pub fn new(nodes: usize) -> Self {
        Self {
            nodes,
            edges: Vec::new(),
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Appends the edge `from → to`.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) -> Result<(), RpError> {
        for node in [from, to] {
            if node >= self.nodes {
                return Err(
                    RpError::graph("node-out-of-range", "node index is not part of the graph")
                        .with_context("node", node)
                        .with_context("nodes", self.nodes),
                );
            }
        }
        if !weight.is_finite() {
            return Err(RpError::graph("non-finite-weight", "edge weights must be finite")
                .with_context("from", from)
                .with_context("to", to)
                .with_context("weight", weight));
        }
        self.edges.push(WeightedEdge { from, to, weight });
        Ok(())
    }
}

impl NegativeCycleDetection for WeightedDigraph {
    /// Bellman-Ford from a virtual source joined to every node by a zero-weight edge.
    fn find_negative_cycle(&self, tolerance: f64) -> CycleSearch {
        let n = self.nodes;
        let mut dist = vec![0.0_f64; n];
        let mut pred: Vec<Option<(usize, f64)>> = vec![None; n];

        for round in 0..n {
            let mut last_relaxed = None;
            for edge in &self.edges {
                let candidate = dist[edge.from] + edge.weight;
                if candidate < dist[edge.to] - tolerance {
                    dist[edge.to] = candidate;
                    pred[edge.to] = Some((edge.from, edge.weight));
                    last_relaxed = Some(edge.to);
                }
            }
            match last_relaxed {
                None => return CycleSearch::NoNegativeCycle,
                Some(node) if round + 1 == n => return extract_cycle(&pred, node),
                Some(_) => {}
            }
        }
        CycleSearch::NoNegativeCycle
    }
}

fn extract_cycle(pred: &[Option<(usize, f64)>], relaxed: usize) -> CycleSearch {
    let n = pred.len();
    let mut start = relaxed;
    for _ in 0..n {
        match pred[start] {
            Some((previous, _)) => start = previous,
            None => return CycleSearch::Unbounded,
        }
    }

    let mut nodes = Vec::new();
    let mut weight = 0.0;
    let mut current = start;
    loop {
        let Some((previous, edge_weight)) = pred[current] else {
            return CycleSearch::Unbounded;
        };
        nodes.push(current);
        weight += edge_weight;
        current = previous;
        if current == start {
            break;
        }
        if nodes.len() > n {
            return CycleSearch::Unbounded;
        }
    }
    nodes.reverse();
    CycleSearch::NegativeCycle(NegativeCycle { nodes, weight })
}

#![deny(missing_docs)]

//! Directed graph primitives behind the revealed-preference axioms: packed
//! boolean relations, transitive closure, and Bellman-Ford negative-cycle
//! search.

mod digraph;
mod relation;
mod weighted;

pub use digraph::{DiGraph, Reachability, TransitiveClosure};
pub use relation::Relation;
pub use weighted::{
    CycleSearch, NegativeCycle, NegativeCycleDetection, WeightedDigraph, WeightedEdge,
};

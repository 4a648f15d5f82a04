use revpref_graph::NegativeCycle;
use serde::{Deserialize, Serialize};

/// Evidence that a dataset violates an axiom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// `preferred` is indirectly revealed preferred to `dispreferred`, yet
    /// `dispreferred` is directly and strictly revealed preferred to `preferred`.
    StrictReversal {
        /// Observation at the head of the weak preference chain.
        preferred: usize,
        /// Observation at the tail of the weak preference chain.
        dispreferred: usize,
    },
    /// Two different bundles are each revealed preferred to the other.
    DistinctBundleCycle {
        /// Observation indirectly revealed preferred to `second`.
        first: usize,
        /// Observation directly revealed preferred to `first`.
        second: usize,
    },
    /// The same bundle was chosen at two different price vectors.
    PriceNonUniqueness {
        /// Lower observation index.
        first: usize,
        /// Higher observation index.
        second: usize,
    },
    /// A cycle of expenditure differences with negative total weight.
    NegativeCycle {
        /// The offending cycle.
        cycle: NegativeCycle,
    },
    /// Bundle `bundle` cost nothing at the prices of `observation`, so the
    /// log-expenditure cycle through both has weight `-∞`.
    ZeroExpenditure {
        /// Observation whose prices make the bundle free.
        observation: usize,
        /// Observation whose bundle is free.
        bundle: usize,
    },
    /// The cycle search could not isolate a cycle but shortest paths are unbounded.
    Unbounded,
    /// Modified prices leave an observation below the unit budget.
    BudgetShortfall {
        /// Offending observation.
        observation: usize,
        /// `q_i · x_i` under the modified prices.
        expenditure: f64,
    },
}

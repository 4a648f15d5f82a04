//! HARP and cyclical monotonicity as negative-cycle searches over
//! expenditure differences.

use nalgebra::DMatrix;
use revpref_core::errors::RpError;
use revpref_graph::{CycleSearch, NegativeCycle, NegativeCycleDetection, WeightedDigraph};

use crate::relations::expenditure_matrix;
use crate::witness::Violation;

/// Returns whether the complete graph weighted by `m[i, j] - m[i, i]` (no
/// self-loops) is free of negative cycles.
pub fn no_negative_cycles(matrix: &DMatrix<f64>) -> Result<bool, RpError> {
    Ok(negative_cycle_search(matrix, 0.0)?.is_acyclic())
}

/// Runs the negative-cycle search behind [`no_negative_cycles`].
pub fn negative_cycle_search(matrix: &DMatrix<f64>, tolerance: f64) -> Result<CycleSearch, RpError> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(
            RpError::dataset("shape-mismatch", "cycle weights require a square matrix")
                .with_context("rows", n)
                .with_context("columns", matrix.ncols()),
        );
    }
    let mut graph = WeightedDigraph::new(n);
    for i in 0..n {
        for j in 0..n {
            if i != j {
                graph.add_edge(i, j, matrix[(i, j)] - matrix[(i, i)])?;
            }
        }
    }
    Ok(graph.find_negative_cycle(tolerance))
}

/// Returns whether the Homothetic Axiom of Revealed Preference holds.
///
/// Own expenditures `p_i · x_i` must be strictly positive and no expenditure
/// may be negative. A zero cross-expenditure `p_i · x_j` is an edge of weight
/// `-∞`, so it closes a negative cycle with any return edge.
pub fn harp(prices: &DMatrix<f64>, bundles: &DMatrix<f64>) -> Result<bool, RpError> {
    Ok(harp_search(prices, bundles, 0.0)?.is_acyclic())
}

/// Negative-cycle search over log-expenditure differences.
///
/// A zero cross-expenditure yields the two-node cycle `[i, j]` with weight
/// `f64::NEG_INFINITY` without running Bellman-Ford.
pub fn harp_search(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
    tolerance: f64,
) -> Result<CycleSearch, RpError> {
    let expenditure = expenditure_matrix(prices, bundles)?;
    if let Some((observation, bundle)) = zero_cost_pair(&expenditure)? {
        return Ok(CycleSearch::NegativeCycle(NegativeCycle {
            nodes: vec![observation, bundle],
            weight: f64::NEG_INFINITY,
        }));
    }
    negative_cycle_search(&expenditure.map(f64::ln), tolerance)
}

/// HARP witness under the given relaxation tolerance.
///
/// Zero cross-expenditures are reported as [`Violation::ZeroExpenditure`] so
/// the witness stays finite when serialized.
pub fn harp_violation(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
    tolerance: f64,
) -> Result<Option<Violation>, RpError> {
    let expenditure = expenditure_matrix(prices, bundles)?;
    if let Some((observation, bundle)) = zero_cost_pair(&expenditure)? {
        return Ok(Some(Violation::ZeroExpenditure { observation, bundle }));
    }
    Ok(cycle_violation(negative_cycle_search(
        &expenditure.map(f64::ln),
        tolerance,
    )?))
}

/// Negative log-expenditure cycle witnessing a HARP violation, if any.
pub fn harp_cycle(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
) -> Result<Option<Violation>, RpError> {
    harp_violation(prices, bundles, 0.0)
}

/// Returns whether the data are cyclically monotone, i.e. rationalizable by a
/// quasilinear utility.
pub fn cyclical_monotonicity(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
) -> Result<bool, RpError> {
    Ok(cyclical_monotonicity_search(prices, bundles, 0.0)?.is_acyclic())
}

/// Negative-cycle search over raw expenditure differences.
pub fn cyclical_monotonicity_search(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
    tolerance: f64,
) -> Result<CycleSearch, RpError> {
    negative_cycle_search(&expenditure_matrix(prices, bundles)?, tolerance)
}

/// Negative expenditure cycle witnessing a cyclical monotonicity violation,
/// if any.
pub fn cyclical_monotonicity_cycle(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
) -> Result<Option<Violation>, RpError> {
    Ok(cycle_violation(cyclical_monotonicity_search(prices, bundles, 0.0)?))
}

/// Element-wise natural log of the expenditure matrix.
pub fn log_expenditure(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
) -> Result<DMatrix<f64>, RpError> {
    let expenditure = expenditure_matrix(prices, bundles)?;
    for i in 0..expenditure.nrows() {
        for j in 0..expenditure.ncols() {
            let value = expenditure[(i, j)];
            if value <= 0.0 {
                return Err(RpError::axiom(
                    "non-positive-expenditure",
                    "log-expenditure differences need strictly positive expenditures",
                )
                .with_context("row", i)
                .with_context("column", j)
                .with_context("expenditure", value));
            }
        }
    }
    Ok(expenditure.map(f64::ln))
}

/// First off-diagonal `(i, j)` in row-major order with `e[i, j] == 0`.
///
/// Fails with `non-positive-expenditure` on a negative entry or a
/// non-positive diagonal, where the log weights are undefined.
fn zero_cost_pair(expenditure: &DMatrix<f64>) -> Result<Option<(usize, usize)>, RpError> {
    let mut first_zero = None;
    for i in 0..expenditure.nrows() {
        for j in 0..expenditure.ncols() {
            let value = expenditure[(i, j)];
            if value < 0.0 || (i == j && value <= 0.0) {
                return Err(RpError::axiom(
                    "non-positive-expenditure",
                    "log-expenditure differences need positive own expenditures and no negative ones",
                )
                .with_context("row", i)
                .with_context("column", j)
                .with_context("expenditure", value));
            }
            if value == 0.0 && first_zero.is_none() {
                first_zero = Some((i, j));
            }
        }
    }
    Ok(first_zero)
}

/// Converts a cycle search into a violation witness.
pub fn cycle_violation(search: CycleSearch) -> Option<Violation> {
    match search {
        CycleSearch::NoNegativeCycle => None,
        CycleSearch::NegativeCycle(cycle) => Some(Violation::NegativeCycle { cycle }),
        CycleSearch::Unbounded => Some(Violation::Unbounded),
    }
}

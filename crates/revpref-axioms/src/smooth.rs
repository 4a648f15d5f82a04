//! Rationalization by differentiable utility.
//!
//! Prices of observations that are mutually revealed indifferent are replaced
//! by their entrywise minimum across the indifference class. Iterating the
//! modification until it stops changing the prices yields the data set on
//! which smooth GARP is tested; smooth SARP uses a single step.

use nalgebra::DMatrix;
use revpref_core::dataset::validate_pair;
use revpref_core::errors::RpError;
use revpref_graph::Reachability;
use tracing::debug;

use crate::axioms::{find_garp_violation, find_sarp_violation};
use crate::relations::build_relations;
use crate::witness::Violation;

/// Fixed point of [`one_modification`].
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPoint {
    /// Modified prices `q*`, unchanged by a further modification.
    pub prices: DMatrix<f64>,
    /// Number of modifications applied, including the one confirming the fixed point.
    pub iterations: usize,
}

/// Applies one indifference-class price modification.
pub fn one_modification(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
) -> Result<DMatrix<f64>, RpError> {
    let closure = build_relations(prices, bundles)?.preference_closure();
    Ok(indifference_minimum(prices, &closure))
}

/// Iterates [`one_modification`] from `prices` until the prices stop changing.
pub fn modified_dataset(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
) -> Result<DMatrix<f64>, RpError> {
    Ok(fixed_point(prices, bundles, None)?.prices)
}

/// Iterates [`one_modification`] to its fixed point, failing with
/// `fixed-point-not-reached` after `max_iterations` modifications when a cap
/// is given.
pub fn fixed_point(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
    max_iterations: Option<usize>,
) -> Result<FixedPoint, RpError> {
    validate_pair(prices, bundles)?;
    let mut current = prices.clone();
    let mut iterations = 0;
    loop {
        let next = one_modification(&current, bundles)?;
        iterations += 1;
        if next == current {
            debug!(iterations, "price modification reached its fixed point");
            return Ok(FixedPoint {
                prices: next,
                iterations,
            });
        }
        if max_iterations.is_some_and(|limit| iterations >= limit) {
            return Err(RpError::axiom(
                "fixed-point-not-reached",
                "price modification did not stabilise within the iteration cap",
            )
            .with_context("iterations", iterations));
        }
        current = next;
    }
}

/// Returns whether the data are rationalized by a differentiable utility.
pub fn smooth_garp(prices: &DMatrix<f64>, bundles: &DMatrix<f64>) -> Result<bool, RpError> {
    Ok(smooth_garp_violation(prices, bundles, None)?.0.is_none())
}

/// GARP witness on the fixed-point prices, together with the iteration count.
pub fn smooth_garp_violation(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
    max_iterations: Option<usize>,
) -> Result<(Option<Violation>, usize), RpError> {
    let fixed = fixed_point(prices, bundles, max_iterations)?;
    let relations = build_relations(&fixed.prices, bundles)?;
    Ok((find_garp_violation(&relations), fixed.iterations))
}

/// Returns whether the data are rationalized by a differentiable, strictly
/// concave utility.
pub fn smooth_sarp(prices: &DMatrix<f64>, bundles: &DMatrix<f64>) -> Result<bool, RpError> {
    Ok(smooth_sarp_violation(prices, bundles)?.is_none())
}

/// Budget shortfall after one modification, or else the SARP witness on the
/// modified prices.
pub fn smooth_sarp_violation(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
) -> Result<Option<Violation>, RpError> {
    let modified = one_modification(prices, bundles)?;
    for observation in 0..modified.nrows() {
        let expenditure = modified.row(observation).dot(&bundles.row(observation));
        if expenditure < 1.0 {
            return Ok(Some(Violation::BudgetShortfall {
                observation,
                expenditure,
            }));
        }
    }
    let relations = build_relations(&modified, bundles)?;
    Ok(find_sarp_violation(&relations, bundles))
}

fn indifference_minimum(prices: &DMatrix<f64>, closure: &impl Reachability) -> DMatrix<f64> {
    let mut modified = prices.clone();
    for observation in 0..prices.nrows() {
        let class = closure.mutually_reachable(observation);
        for good in 0..prices.ncols() {
            if let Some(lowest) = class
                .iter()
                .map(|&member| prices[(member, good)])
                .reduce(f64::min)
            {
                modified[(observation, good)] = lowest;
            }
        }
    }
    modified
}

//! GARP, SARP and Strong SARP.
//!
//! Every check builds the direct relations, closes the weak one transitively
//! and scans the closure in row-major order; the first offending pair is
//! returned as the witness.

use nalgebra::DMatrix;
use revpref_core::errors::RpError;

use crate::relations::{build_relations, RevealedRelations};
use crate::witness::Violation;

/// Returns whether the Generalized Axiom of Revealed Preference holds.
pub fn garp(prices: &DMatrix<f64>, bundles: &DMatrix<f64>) -> Result<bool, RpError> {
    Ok(garp_violation(prices, bundles)?.is_none())
}

/// Returns the first GARP violation, if any.
pub fn garp_violation(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
) -> Result<Option<Violation>, RpError> {
    let relations = build_relations(prices, bundles)?;
    Ok(find_garp_violation(&relations))
}

/// Returns whether the Strong Axiom of Revealed Preference holds.
///
/// Mutual revealed preference between identical bundles is not a violation.
pub fn sarp(prices: &DMatrix<f64>, bundles: &DMatrix<f64>) -> Result<bool, RpError> {
    Ok(sarp_violation(prices, bundles)?.is_none())
}

/// Returns the first SARP violation, if any.
pub fn sarp_violation(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
) -> Result<Option<Violation>, RpError> {
    let relations = build_relations(prices, bundles)?;
    Ok(find_sarp_violation(&relations, bundles))
}

/// Returns whether Strong SARP holds: SARP, and no bundle is ever chosen at two
/// different price vectors.
pub fn strong_sarp(prices: &DMatrix<f64>, bundles: &DMatrix<f64>) -> Result<bool, RpError> {
    Ok(strong_sarp_violation(prices, bundles)?.is_none())
}

/// Returns the first Strong SARP violation, if any.
pub fn strong_sarp_violation(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
) -> Result<Option<Violation>, RpError> {
    if let Some(violation) = sarp_violation(prices, bundles)? {
        return Ok(Some(violation));
    }
    let n = prices.nrows();
    for first in 0..n {
        for second in first + 1..n {
            if bundles.row(first) == bundles.row(second)
                && prices.row(first) != prices.row(second)
            {
                return Ok(Some(Violation::PriceNonUniqueness { first, second }));
            }
        }
    }
    Ok(None)
}

pub(crate) fn find_garp_violation(relations: &RevealedRelations) -> Option<Violation> {
    relations
        .preference_closure()
        .edges()
        .find(|&(i, j)| relations.strict.contains(j, i))
        .map(|(preferred, dispreferred)| Violation::StrictReversal {
            preferred,
            dispreferred,
        })
}

pub(crate) fn find_sarp_violation(
    relations: &RevealedRelations,
    bundles: &DMatrix<f64>,
) -> Option<Violation> {
    relations
        .preference_closure()
        .edges()
        .find(|&(i, j)| relations.weak.contains(j, i) && bundles.row(i) != bundles.row(j))
        .map(|(first, second)| Violation::DistinctBundleCycle { first, second })
}

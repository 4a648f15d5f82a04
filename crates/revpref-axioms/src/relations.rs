use nalgebra::DMatrix;
use revpref_core::dataset::validate_pair;
use revpref_core::errors::RpError;
use revpref_graph::{DiGraph, Relation, TransitiveClosure};

/// Expenditure matrix and the direct revealed-preference relations it induces.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealedRelations {
    /// `e[i, j] = p_i · x_j`, the cost of bundle `j` at the prices of observation `i`.
    pub expenditure: DMatrix<f64>,
    /// Direct revealed preference: `(i, j)` iff `e[i, j] <= e[i, i]`.
    pub weak: Relation,
    /// Direct strict revealed preference: `(i, j)` iff `e[i, j] < e[i, i]`.
    pub strict: Relation,
}

impl RevealedRelations {
    /// Derives both relations from a square expenditure matrix.
    pub fn from_expenditure(expenditure: DMatrix<f64>) -> Result<Self, RpError> {
        let n = expenditure.nrows();
        if expenditure.ncols() != n {
            return Err(RpError::dataset(
                "shape-mismatch",
                "expenditure matrix must be square",
            )
            .with_context("rows", n)
            .with_context("columns", expenditure.ncols()));
        }
        let weak = Relation::from_fn(n, |i, j| expenditure[(i, j)] <= expenditure[(i, i)]);
        let strict = Relation::from_fn(n, |i, j| expenditure[(i, j)] < expenditure[(i, i)]);
        Ok(Self {
            expenditure,
            weak,
            strict,
        })
    }

    /// Number of observations.
    pub fn observations(&self) -> usize {
        self.expenditure.nrows()
    }

    /// Transitive closure of the weak relation (indirect revealed preference).
    pub fn preference_closure(&self) -> TransitiveClosure {
        preference_closure(&self.weak)
    }
}

/// Computes `e = p · xᵗ`.
pub fn expenditure_matrix(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
) -> Result<DMatrix<f64>, RpError> {
    validate_pair(prices, bundles)?;
    Ok(prices * bundles.transpose())
}

/// Computes the expenditure matrix and the weak and strict direct relations.
pub fn build_relations(
    prices: &DMatrix<f64>,
    bundles: &DMatrix<f64>,
) -> Result<RevealedRelations, RpError> {
    RevealedRelations::from_expenditure(expenditure_matrix(prices, bundles)?)
}

/// Indirect revealed preference: the transitive closure of the graph whose
/// edges are the pairs of `direct`.
pub fn preference_closure(direct: &Relation) -> TransitiveClosure {
    DiGraph::from_relation(direct).transitive_closure()
}

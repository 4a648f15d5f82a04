//! Validated price/bundle panels.

use nalgebra::DMatrix;

use crate::errors::RpError;

/// Observed panel of `N` choices over `K` goods.
///
/// Row `i` of [`Dataset::prices`] is the price vector `p_i` that prevailed
/// when bundle `x_i` (row `i` of [`Dataset::bundles`]) was chosen. The
/// revealed-preference axioms assume budgets are normalized so that
/// `p_i · x_i = 1`; construction does not enforce this, see
/// [`Dataset::validate_normalization`] and [`Dataset::normalized`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    prices: DMatrix<f64>,
    bundles: DMatrix<f64>,
}

impl Dataset {
    /// Creates a dataset after checking shapes and entries.
    pub fn new(prices: DMatrix<f64>, bundles: DMatrix<f64>) -> Result<Self, RpError> {
        validate_pair(&prices, &bundles)?;
        Ok(Self { prices, bundles })
    }

    /// Creates a dataset from row-major observation vectors.
    pub fn from_rows(prices: &[Vec<f64>], bundles: &[Vec<f64>]) -> Result<Self, RpError> {
        let prices = matrix_from_rows("prices", prices)?;
        let bundles = matrix_from_rows("bundles", bundles)?;
        Self::new(prices, bundles)
    }

    /// Returns the `N×K` price matrix.
    pub fn prices(&self) -> &DMatrix<f64> {
        &self.prices
    }

    /// Returns the `N×K` bundle matrix.
    pub fn bundles(&self) -> &DMatrix<f64> {
        &self.bundles
    }

    /// Number of observations `N`.
    pub fn observations(&self) -> usize {
        self.prices.nrows()
    }

    /// Number of goods `K`.
    pub fn goods(&self) -> usize {
        self.prices.ncols()
    }

    /// Expenditure `p_i · x_i` of observation `i`.
    pub fn budget(&self, observation: usize) -> f64 {
        self.prices.row(observation).dot(&self.bundles.row(observation))
    }

    /// Returns `p_i · x_i - 1` for every observation.
    pub fn budget_residuals(&self) -> Vec<f64> {
        (0..self.observations())
            .map(|i| self.budget(i) - 1.0)
            .collect()
    }

    /// Fails with `normalization-violation` when some budget deviates from one
    /// by more than `tolerance`.
    pub fn validate_normalization(&self, tolerance: f64) -> Result<(), RpError> {
        for (observation, residual) in self.budget_residuals().into_iter().enumerate() {
            if residual.abs() > tolerance {
                return Err(RpError::dataset(
                    "normalization-violation",
                    "observed expenditure p_i · x_i is not normalized to one",
                )
                .with_context("observation", observation)
                .with_context("budget", residual + 1.0)
                .with_context("tolerance", tolerance)
                .with_hint("rescale prices explicitly with `Dataset::normalized`"));
            }
        }
        Ok(())
    }

    /// Returns a copy whose price rows are divided by their own budget.
    ///
    /// Budgets must be strictly positive.
    pub fn normalized(&self) -> Result<Self, RpError> {
        let mut prices = self.prices.clone();
        for observation in 0..self.observations() {
            let budget = self.budget(observation);
            if !budget.is_finite() || budget <= 0.0 {
                return Err(RpError::dataset(
                    "non-positive-budget",
                    "cannot normalize an observation with non-positive expenditure",
                )
                .with_context("observation", observation)
                .with_context("budget", budget));
            }
            let mut row = prices.row_mut(observation);
            row /= budget;
        }
        Ok(Self {
            prices,
            bundles: self.bundles.clone(),
        })
    }

    /// Returns a dataset sharing these bundles but priced at `prices`.
    pub fn with_prices(&self, prices: DMatrix<f64>) -> Result<Self, RpError> {
        Self::new(prices, self.bundles.clone())
    }
}

/// Checks that `prices` and `bundles` describe the same non-empty `N×K` panel
/// of finite entries.
pub fn validate_pair(prices: &DMatrix<f64>, bundles: &DMatrix<f64>) -> Result<(), RpError> {
    if prices.nrows() != bundles.nrows() || prices.ncols() != bundles.ncols() {
        return Err(RpError::dataset(
            "shape-mismatch",
            "price and bundle matrices must have identical shapes",
        )
        .with_context("prices", format!("{}x{}", prices.nrows(), prices.ncols()))
        .with_context("bundles", format!("{}x{}", bundles.nrows(), bundles.ncols())));
    }
    if prices.nrows() == 0 || prices.ncols() == 0 {
        return Err(RpError::dataset(
            "empty-dataset",
            "at least one observation over at least one good is required",
        )
        .with_context("observations", prices.nrows())
        .with_context("goods", prices.ncols()));
    }
    ensure_finite("prices", prices)?;
    ensure_finite("bundles", bundles)
}

/// Returns the rows of `matrix` as owned vectors.
pub fn matrix_rows(matrix: &DMatrix<f64>) -> Vec<Vec<f64>> {
    matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

/// Builds a matrix from row-major vectors, rejecting ragged input.
pub fn matrix_from_rows(label: &str, rows: &[Vec<f64>]) -> Result<DMatrix<f64>, RpError> {
    let ncols = rows.first().map_or(0, Vec::len);
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != ncols) {
        return Err(RpError::dataset("ragged-rows", "matrix rows differ in length")
            .with_context("matrix", label)
            .with_context("row", index)
            .with_context("expected", ncols)
            .with_context("found", row.len()));
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Ok(DMatrix::from_row_slice(rows.len(), ncols, &flat))
}

fn ensure_finite(label: &str, matrix: &DMatrix<f64>) -> Result<(), RpError> {
    for (row, values) in matrix.row_iter().enumerate() {
        if let Some(col) = values.iter().position(|value| !value.is_finite()) {
            return Err(
                RpError::dataset("non-finite-entry", "matrix contains NaN or infinity")
                    .with_context("matrix", label)
                    .with_context("row", row)
                    .with_context("column", col),
            );
        }
    }
    Ok(())
}

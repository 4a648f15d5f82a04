#![allow(dead_code)]

use nalgebra::DMatrix;

pub fn matrix(rows: &[&[f64]]) -> DMatrix<f64> {
    let ncols = rows.first().map_or(0, |row| row.len());
    let flat: Vec<f64> = rows.iter().flat_map(|row| row.iter().copied()).collect();
    DMatrix::from_row_slice(rows.len(), ncols, &flat)
}

/// Three goods, each observation buying one good; strict revealed preference
/// runs 0 → 1 → 2 → 0.
pub fn strict_cycle() -> (DMatrix<f64>, DMatrix<f64>) {
    let prices = matrix(&[&[1.0, 0.5, 2.0], &[2.0, 1.0, 0.5], &[0.5, 2.0, 1.0]]);
    let bundles = matrix(&[&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]]);
    (prices, bundles)
}

/// Two observations on the unit budget, neither affordable at the other's prices.
pub fn crossing_budgets() -> (DMatrix<f64>, DMatrix<f64>) {
    let prices = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
    let bundles = matrix(&[&[1.0, 2.0], &[2.0, 1.0]]);
    (prices, bundles)
}

/// The same bundle chosen at two different unit-budget price vectors.
pub fn repeated_choice() -> (DMatrix<f64>, DMatrix<f64>) {
    let prices = matrix(&[&[0.5, 0.5], &[0.25, 0.75]]);
    let bundles = matrix(&[&[1.0, 1.0], &[1.0, 1.0]]);
    (prices, bundles)
}

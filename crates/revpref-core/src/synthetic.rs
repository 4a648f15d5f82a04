//! Seeded synthetic panels for tests, benches and the CLI `generate` command.

use crate::dataset::Dataset;
use crate::errors::RpError;
use crate::rng::RngHandle;

const PRICE_RANGE: (f64, f64) = (0.5, 2.0);

/// Panel generated by a single Cobb-Douglas consumer with unit income.
///
/// Demand is `x_k = a_k / p_k` with expenditure shares `a` summing to one, so
/// the data are rationalized by a homothetic utility. Budgets equal one only
/// up to rounding: `p_i · x_i` may land a few ulps below one, which exact
/// unit-budget tests such as smooth SARP's treat as a shortfall.
pub fn cobb_douglas_panel(seed: u64, observations: usize, goods: usize) -> Result<Dataset, RpError> {
    let mut shares = RngHandle::substream(seed, u64::MAX).uniform_vec(goods, 0.1, 1.0);
    let total: f64 = shares.iter().sum();
    shares.iter_mut().for_each(|share| *share /= total);

    let mut prices = Vec::with_capacity(observations);
    let mut bundles = Vec::with_capacity(observations);
    for observation in 0..observations {
        let mut rng = RngHandle::substream(seed, observation as u64);
        let price = rng.uniform_vec(goods, PRICE_RANGE.0, PRICE_RANGE.1);
        let bundle = shares
            .iter()
            .zip(&price)
            .map(|(share, p)| share / p)
            .collect();
        prices.push(price);
        bundles.push(bundle);
    }
    Dataset::from_rows(&prices, &bundles)
}

/// Panel with independent uniform prices and bundles, rescaled to unit budgets.
pub fn uniform_panel(seed: u64, observations: usize, goods: usize) -> Result<Dataset, RpError> {
    let mut prices = Vec::with_capacity(observations);
    let mut bundles = Vec::with_capacity(observations);
    for observation in 0..observations {
        let mut rng = RngHandle::substream(seed, observation as u64);
        prices.push(rng.uniform_vec(goods, PRICE_RANGE.0, PRICE_RANGE.1));
        bundles.push(rng.uniform_vec(goods, 0.1, 1.0));
    }
    Dataset::from_rows(&prices, &bundles)?.normalized()
}

use revpref_core::config::{Axiom, CheckConfig, NormalizationCheck};
use revpref_core::dataset::Dataset;
use revpref_core::errors::RpError;
use revpref_core::hash::{dataset_hash, hash_json};
use revpref_core::provenance::CheckProvenance;
use tracing::{debug, warn};

use crate::axioms::{garp_violation, sarp_violation, strong_sarp_violation};
use crate::cycles::{cycle_violation, cyclical_monotonicity_search, harp_violation};
use crate::report::{AxiomCheck, ConsistencyReport};
use crate::smooth::{smooth_garp_violation, smooth_sarp_violation};
use crate::witness::Violation;

/// Runs a configured selection of axioms against datasets.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyChecker {
    config: CheckConfig,
}

impl ConsistencyChecker {
    /// Creates a checker after validating `config`.
    pub fn new(config: CheckConfig) -> Result<Self, RpError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the effective configuration.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Evaluates every configured axiom on `dataset`.
    pub fn check(&self, dataset: &Dataset) -> Result<ConsistencyReport, RpError> {
        if let NormalizationCheck::Validate { tolerance } = self.config.normalization {
            dataset.validate_normalization(tolerance)?;
        }

        let mut checks = Vec::with_capacity(self.config.axioms.len());
        let mut fixed_point_iterations = None;
        for &axiom in &self.config.axioms {
            let (violation, iterations) = self.evaluate(axiom, dataset)?;
            if iterations.is_some() {
                fixed_point_iterations = iterations;
            }
            let pass = violation.is_none();
            match &violation {
                Some(witness) => warn!(axiom = axiom.label(), ?witness, "axiom violated"),
                None => debug!(axiom = axiom.label(), "axiom holds"),
            }
            checks.push(AxiomCheck {
                axiom,
                pass,
                witness: violation.filter(|_| self.config.witnesses),
            });
        }

        let provenance = CheckProvenance::new(dataset_hash(dataset)?, hash_json(&self.config)?)
            .with_tool("revpref-axioms", env!("CARGO_PKG_VERSION"));
        ConsistencyReport::new(
            dataset.observations(),
            dataset.goods(),
            checks,
            fixed_point_iterations,
            provenance,
        )
    }

    /// Evaluates a single axiom, returning its witness and, for smooth GARP,
    /// the number of price modifications performed.
    pub fn evaluate(
        &self,
        axiom: Axiom,
        dataset: &Dataset,
    ) -> Result<(Option<Violation>, Option<usize>), RpError> {
        let prices = dataset.prices();
        let bundles = dataset.bundles();
        let tolerance = self.config.cycle_tolerance;
        let outcome = match axiom {
            Axiom::Garp => (garp_violation(prices, bundles)?, None),
            Axiom::Sarp => (sarp_violation(prices, bundles)?, None),
            Axiom::StrongSarp => (strong_sarp_violation(prices, bundles)?, None),
            Axiom::Harp => (harp_violation(prices, bundles, tolerance)?, None),
            Axiom::CyclicalMonotonicity => (
                cycle_violation(cyclical_monotonicity_search(prices, bundles, tolerance)?),
                None,
            ),
            Axiom::SmoothGarp => {
                let (violation, iterations) = smooth_garp_violation(
                    prices,
                    bundles,
                    self.config.max_fixed_point_iterations,
                )?;
                (violation, Some(iterations))
            }
            Axiom::SmoothSarp => (smooth_sarp_violation(prices, bundles)?, None),
        };
        Ok(outcome)
    }
}

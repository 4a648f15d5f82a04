use nalgebra::DMatrix;
use revpref_core::config::Axiom;
use revpref_core::dataset::matrix_rows;
use revpref_core::errors::RpError;
use revpref_core::hash::hash_json;
use revpref_core::provenance::{CheckProvenance, SchemaVersion, REPORT_SCHEMA};
use serde::{Deserialize, Serialize};

use crate::relations::RevealedRelations;
use crate::witness::Violation;

/// Verdict for a single axiom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxiomCheck {
    /// Axiom evaluated.
    pub axiom: Axiom,
    /// Whether the dataset satisfies the axiom.
    pub pass: bool,
    /// First violation found, when witnesses are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub witness: Option<Violation>,
}

/// Aggregated verdicts for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// Schema of this payload.
    pub schema_version: SchemaVersion,
    /// Content hash of everything below.
    pub analysis_hash: String,
    /// Number of observations checked.
    pub observations: usize,
    /// Number of goods per observation.
    pub goods: usize,
    /// Per-axiom verdicts in configured order.
    pub checks: Vec<AxiomCheck>,
    /// Price modifications needed to reach the smooth GARP fixed point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_point_iterations: Option<usize>,
    /// Hashes of the inputs.
    pub provenance: CheckProvenance,
}

impl ConsistencyReport {
    /// Assembles a report and computes its content hash.
    pub fn new(
        observations: usize,
        goods: usize,
        checks: Vec<AxiomCheck>,
        fixed_point_iterations: Option<usize>,
        provenance: CheckProvenance,
    ) -> Result<Self, RpError> {
        #[derive(Serialize)]
        struct Payload<'a> {
            schema_version: SchemaVersion,
            observations: usize,
            goods: usize,
            checks: &'a [AxiomCheck],
            fixed_point_iterations: Option<usize>,
            provenance: &'a CheckProvenance,
        }

        let analysis_hash = hash_json(&Payload {
            schema_version: REPORT_SCHEMA,
            observations,
            goods,
            checks: &checks,
            fixed_point_iterations,
            provenance: &provenance,
        })?;
        Ok(Self {
            schema_version: REPORT_SCHEMA,
            analysis_hash,
            observations,
            goods,
            checks,
            fixed_point_iterations,
            provenance,
        })
    }

    /// Verdict for `axiom`, if it was evaluated.
    pub fn verdict(&self, axiom: Axiom) -> Option<bool> {
        self.checks
            .iter()
            .find(|check| check.axiom == axiom)
            .map(|check| check.pass)
    }

    /// Returns whether every evaluated axiom holds.
    pub fn consistent(&self) -> bool {
        self.checks.iter().all(|check| check.pass)
    }

    /// Axioms that failed, in report order.
    pub fn failed(&self) -> impl Iterator<Item = Axiom> + '_ {
        self.checks
            .iter()
            .filter(|check| !check.pass)
            .map(|check| check.axiom)
    }
}

/// JSON rendering of [`RevealedRelations`] plus the indirect relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationsReport {
    /// Expenditure matrix rows.
    pub expenditure: Vec<Vec<f64>>,
    /// Direct revealed preference.
    pub direct_weak: Vec<Vec<bool>>,
    /// Direct strict revealed preference.
    pub direct_strict: Vec<Vec<bool>>,
    /// Transitive closure of the direct relation.
    pub indirect: Vec<Vec<bool>>,
}

impl From<&RevealedRelations> for RelationsReport {
    fn from(relations: &RevealedRelations) -> Self {
        Self {
            expenditure: matrix_rows(&relations.expenditure),
            direct_weak: relations.weak.to_rows(),
            direct_strict: relations.strict.to_rows(),
            indirect: relations.preference_closure().relation().to_rows(),
        }
    }
}

/// Modified prices produced by the smooth rationalization step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedPricesReport {
    /// Modified price rows.
    pub prices: Vec<Vec<f64>>,
    /// Modifications applied.
    pub iterations: usize,
}

impl ModifiedPricesReport {
    /// Wraps a modified price matrix.
    pub fn new(prices: &DMatrix<f64>, iterations: usize) -> Self {
        Self {
            prices: matrix_rows(prices),
            iterations,
        }
    }
}

fn map_err(err: serde_json::Error, code: &str) -> RpError {
    RpError::serde(code, err.to_string())
}

/// Serialises a consistency report to pretty JSON.
pub fn report_to_json(report: &ConsistencyReport) -> Result<String, RpError> {
    serde_json::to_string_pretty(report).map_err(|err| map_err(err, "report-serialize"))
}

/// Restores a consistency report from JSON.
pub fn report_from_json(json: &str) -> Result<ConsistencyReport, RpError> {
    serde_json::from_str(json).map_err(|err| map_err(err, "report-deserialize"))
}

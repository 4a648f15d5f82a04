//! Check configuration loaded from YAML.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::RpError;

/// Revealed-preference axioms understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axiom {
    /// Generalized Axiom of Revealed Preference.
    Garp,
    /// Strong Axiom of Revealed Preference.
    Sarp,
    /// SARP plus uniqueness of the price vector supporting each bundle.
    StrongSarp,
    /// Homothetic Axiom of Revealed Preference.
    Harp,
    /// Rationalization by a quasilinear utility.
    CyclicalMonotonicity,
    /// GARP on the fixed point of the indifference price modification.
    SmoothGarp,
    /// SARP on a single indifference price modification.
    SmoothSarp,
}

impl Axiom {
    /// Every axiom, in canonical report order.
    pub const ALL: [Axiom; 7] = [
        Axiom::Garp,
        Axiom::Sarp,
        Axiom::StrongSarp,
        Axiom::Harp,
        Axiom::CyclicalMonotonicity,
        Axiom::SmoothGarp,
        Axiom::SmoothSarp,
    ];

    /// Stable snake_case label used in reports and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Axiom::Garp => "garp",
            Axiom::Sarp => "sarp",
            Axiom::StrongSarp => "strong_sarp",
            Axiom::Harp => "harp",
            Axiom::CyclicalMonotonicity => "cyclical_monotonicity",
            Axiom::SmoothGarp => "smooth_garp",
            Axiom::SmoothSarp => "smooth_sarp",
        }
    }

    /// Parses a label produced by [`Axiom::label`].
    pub fn from_label(label: &str) -> Result<Self, RpError> {
        Axiom::ALL
            .into_iter()
            .find(|axiom| axiom.label() == label)
            .ok_or_else(|| {
                RpError::config("unknown-axiom", "axiom label not recognised")
                    .with_context("label", label)
            })
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the checker validates the `p_i · x_i = 1` precondition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum NormalizationCheck {
    /// Trust the caller; unnormalized input yields meaningless verdicts.
    #[default]
    Unchecked,
    /// Reject datasets whose budgets deviate from one by more than `tolerance`.
    Validate {
        /// Maximum absolute deviation of `p_i · x_i` from one.
        #[serde(default = "default_normalization_tolerance")]
        tolerance: f64,
    },
}

fn default_normalization_tolerance() -> f64 {
    1e-9
}

/// YAML-configurable parameters governing a consistency check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Axioms to evaluate, reported in this order.
    #[serde(default = "default_axioms")]
    pub axioms: Vec<Axiom>,
    /// Normalization precondition policy.
    #[serde(default)]
    pub normalization: NormalizationCheck,
    /// Slack subtracted before accepting a Bellman-Ford relaxation.
    #[serde(default)]
    pub cycle_tolerance: f64,
    /// Optional cap on fixed-point iterations for smooth GARP.
    #[serde(default)]
    pub max_fixed_point_iterations: Option<usize>,
    /// Whether reports carry violation witnesses.
    #[serde(default = "default_witnesses")]
    pub witnesses: bool,
}

fn default_axioms() -> Vec<Axiom> {
    Axiom::ALL.to_vec()
}

fn default_witnesses() -> bool {
    true
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            axioms: default_axioms(),
            normalization: NormalizationCheck::default(),
            cycle_tolerance: 0.0,
            max_fixed_point_iterations: None,
            witnesses: default_witnesses(),
        }
    }
}

impl CheckConfig {
    /// Parses and validates a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RpError> {
        let config: CheckConfig = serde_yaml::from_str(yaml)
            .map_err(|err| RpError::config("config-parse", err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, RpError> {
        let yaml = std::fs::read_to_string(path).map_err(|err| {
            RpError::io("config-read", err.to_string())
                .with_context("path", path.display())
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Serializes the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String, RpError> {
        serde_yaml::to_string(self).map_err(|err| RpError::serde("config-serialize", err.to_string()))
    }

    /// Rejects configurations that cannot drive a check.
    pub fn validate(&self) -> Result<(), RpError> {
        if self.axioms.is_empty() {
            return Err(RpError::config("no-axioms", "at least one axiom must be selected"));
        }
        if !self.cycle_tolerance.is_finite() || self.cycle_tolerance < 0.0 {
            return Err(RpError::config(
                "invalid-cycle-tolerance",
                "cycle tolerance must be finite and non-negative",
            )
            .with_context("cycle_tolerance", self.cycle_tolerance));
        }
        if let NormalizationCheck::Validate { tolerance } = self.normalization {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(RpError::config(
                    "invalid-normalization-tolerance",
                    "normalization tolerance must be finite and non-negative",
                )
                .with_context("tolerance", tolerance));
            }
        }
        if self.max_fixed_point_iterations == Some(0) {
            return Err(RpError::config(
                "invalid-iteration-cap",
                "fixed-point iteration cap must be positive",
            ));
        }
        Ok(())
    }
}

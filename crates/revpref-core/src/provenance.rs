//! Provenance and schema descriptors attached to revpref artefacts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        REPORT_SCHEMA
    }
}

/// Schema version stamped on consistency reports.
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Inputs that produced a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CheckProvenance {
    /// Content hash of the dataset the checks ran on.
    pub dataset_hash: String,
    /// Content hash of the effective configuration.
    pub config_hash: String,
    /// Version map for the crates involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}

impl CheckProvenance {
    /// Creates provenance stamped with this crate's version.
    pub fn new(dataset_hash: String, config_hash: String) -> Self {
        let tool_versions = [(
            "revpref-core".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        )]
        .into_iter()
        .collect();
        Self {
            dataset_hash,
            config_hash,
            tool_versions,
        }
    }

    /// Records the version of an additional tool.
    pub fn with_tool(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.tool_versions.insert(name.into(), version.into());
        self
    }
}

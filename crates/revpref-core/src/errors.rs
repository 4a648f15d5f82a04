//! Structured error types shared across revpref crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`RpError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code (`shape-mismatch`, `empty-dataset`, ...).
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (row counts, indices, tolerances).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the revealed-preference engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum RpError {
    /// Malformed price/bundle input (shape mismatch, empty panel, bad entries).
    #[error("dataset error: {0}")]
    Dataset(ErrorInfo),
    /// Misuse of the graph primitives.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Failures raised while evaluating an axiom.
    #[error("axiom error: {0}")]
    Axiom(ErrorInfo),
    /// Invalid check configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Filesystem errors raised while reading or writing artefacts.
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

impl RpError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            RpError::Dataset(info)
            | RpError::Graph(info)
            | RpError::Axiom(info)
            | RpError::Config(info)
            | RpError::Serde(info)
            | RpError::Io(info) => info,
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Shorthand for a [`RpError::Dataset`] error.
    pub fn dataset(code: impl Into<String>, message: impl Into<String>) -> Self {
        RpError::Dataset(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`RpError::Graph`] error.
    pub fn graph(code: impl Into<String>, message: impl Into<String>) -> Self {
        RpError::Graph(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`RpError::Axiom`] error.
    pub fn axiom(code: impl Into<String>, message: impl Into<String>) -> Self {
        RpError::Axiom(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`RpError::Config`] error.
    pub fn config(code: impl Into<String>, message: impl Into<String>) -> Self {
        RpError::Config(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`RpError::Serde`] error.
    pub fn serde(code: impl Into<String>, message: impl Into<String>) -> Self {
        RpError::Serde(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`RpError::Io`] error.
    pub fn io(code: impl Into<String>, message: impl Into<String>) -> Self {
        RpError::Io(ErrorInfo::new(code, message))
    }

    /// Adds a context entry to the wrapped payload.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.map_info(|info| info.with_context(key, value))
    }

    /// Sets a remediation hint on the wrapped payload.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.map_info(|info| info.with_hint(hint))
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            RpError::Dataset(info) => RpError::Dataset(f(info)),
            RpError::Graph(info) => RpError::Graph(f(info)),
            RpError::Axiom(info) => RpError::Axiom(f(info)),
            RpError::Config(info) => RpError::Config(f(info)),
            RpError::Serde(info) => RpError::Serde(f(info)),
            RpError::Io(info) => RpError::Io(f(info)),
        }
    }
}

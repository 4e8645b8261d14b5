//! Error types for chart construction.
//!
//! Each pipeline stage reports its own error type:
//!
//! - [`ValidationError`] - raised by the record normalizer for malformed rows.
//! - [`HierarchyError`] - raised by the hierarchy builder for structural defects.
//! - [`ConfigError`] - raised when configuration cannot be loaded or is invalid.
//!
//! [`OrgChartError`] wraps all of them for callers that run the whole pipeline.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use orgchart_core::identifier::Id;

/// The main error type for chart operations.
///
/// A failed build never yields a partial chart; the first error detected
/// is returned and all intermediate results are discarded.
#[derive(Debug, Error)]
pub enum OrgChartError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input rows: {0}")]
    Input(#[source] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

/// A person field that every row must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Id,
    Name,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => f.write_str("id"),
            Self::Name => f.write_str("name"),
        }
    }
}

/// Input rows that cannot be turned into person records.
///
/// Row indices are 0-based positions in the input sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("row {row}: required field `{field}` (column `{column}`) is missing or empty")]
    MissingField {
        row: usize,
        field: RequiredField,
        column: String,
    },

    #[error("row {row}: duplicate id `{id}`, first used in row {first_row}")]
    DuplicateId { row: usize, id: Id, first_row: usize },
}

impl ValidationError {
    /// Returns the index of the offending row.
    pub fn row(&self) -> usize {
        match self {
            Self::MissingField { row, .. } | Self::DuplicateId { row, .. } => *row,
        }
    }
}

/// Structural defects in the reporting relationships.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HierarchyError {
    #[error("`{id}` reports to `{manager_id}`, which is not a known id")]
    DanglingManager { id: Id, manager_id: Id },

    #[error("reporting cycle detected: {}", CycleDisplay(.members))]
    CycleDetected { members: Vec<Id> },

    #[error("id `{id}` appears more than once")]
    DuplicateId { id: Id },
}

impl HierarchyError {
    /// Returns the ids involved in the defect.
    pub fn ids(&self) -> Vec<Id> {
        match self {
            Self::DanglingManager { id, .. } | Self::DuplicateId { id } => vec![id.clone()],
            Self::CycleDetected { members } => members.clone(),
        }
    }
}

/// Renders cycle members as `a -> b -> c -> a`.
struct CycleDisplay<'a>(&'a [Id]);

impl fmt::Display for CycleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for member in self.0 {
            write!(f, "{member} -> ")?;
        }
        match self.0.first() {
            Some(first) => write!(f, "{first}"),
            None => Ok(()),
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

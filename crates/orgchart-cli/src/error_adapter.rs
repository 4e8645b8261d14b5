//! Error adapter for converting OrgChartError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::{fmt, io};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use orgchart::{ConfigError, HierarchyError, OrgChartError, ValidationError};

/// Adapter exposing an [`OrgChartError`] as a miette diagnostic.
///
/// Every error maps to a stable code; errors the user can fix in their
/// input or configuration also carry help text.
pub struct ErrorAdapter<'a>(pub &'a OrgChartError);

impl ErrorAdapter<'_> {
    fn code_str(&self) -> &'static str {
        match self.0 {
            OrgChartError::Io(_) => "orgchart::io",
            OrgChartError::Input(_) => "orgchart::input",
            OrgChartError::Validation(err) => match err {
                ValidationError::MissingField { .. } => "orgchart::validation::missing_field",
                ValidationError::DuplicateId { .. } => "orgchart::validation::duplicate_id",
            },
            OrgChartError::Hierarchy(err) => match err {
                HierarchyError::DanglingManager { .. } => "orgchart::hierarchy::dangling_manager",
                HierarchyError::CycleDetected { .. } => "orgchart::hierarchy::cycle",
                HierarchyError::DuplicateId { .. } => "orgchart::hierarchy::duplicate_id",
            },
            OrgChartError::Config(_) => "orgchart::config",
            OrgChartError::Export(_) => "orgchart::export",
        }
    }

    fn help_str(&self) -> Option<&'static str> {
        match self.0 {
            OrgChartError::Io(err) if err.kind() == io::ErrorKind::NotFound => {
                Some("Check that the file path exists")
            }
            OrgChartError::Input(_) => Some("Input must be a JSON array of objects keyed by column name"),
            OrgChartError::Validation(ValidationError::MissingField { .. }) => Some(
                "Every row needs a non-empty id and name; map differently named columns under `[columns]` in the configuration",
            ),
            OrgChartError::Validation(ValidationError::DuplicateId { .. })
            | OrgChartError::Hierarchy(HierarchyError::DuplicateId { .. }) => {
                Some("Ids must be unique across all rows")
            }
            OrgChartError::Hierarchy(HierarchyError::DanglingManager { .. }) => Some(
                "Fix the manager id, or set `dangling_managers = \"demote\"` under `[hierarchy]` to make such people roots",
            ),
            OrgChartError::Hierarchy(HierarchyError::CycleDetected { .. }) => {
                Some("Every chain of managers must end at a person without a manager")
            }
            OrgChartError::Config(ConfigError::Validation(_)) => {
                Some("Layout spacings must be positive numbers and column names must not be blank")
            }
            OrgChartError::Io(_) | OrgChartError::Config(_) | OrgChartError::Export(_) => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_str()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

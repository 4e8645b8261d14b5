//! Orgchart - builds positioned organizational charts from tabular records.
//!
//! The pipeline has four pure stages:
//!
//! 1. [`normalize::RecordNormalizer`] turns raw rows into validated people.
//! 2. [`hierarchy::HierarchyBuilder`] links people to their managers and
//!    rejects dangling references and reporting cycles.
//! 3. [`layout::LayoutEngine`] computes a deterministic tidy-tree layout.
//! 4. [`export::GraphExporter`] flattens the layout into a renderer-neutral
//!    [`export::Chart`].
//!
//! [`ChartBuilder`] runs all four stages with one [`config::AppConfig`].
//! No stage performs I/O; reading rows and writing charts is the caller's job.

pub mod config;
pub mod export;
pub mod hierarchy;
pub mod layout;
pub mod normalize;

mod error;

pub use orgchart_core::{geometry, identifier, person, row};

pub use error::{
    ConfigError, HierarchyError, OrgChartError, RequiredField, ValidationError,
};

use log::{debug, info};

use config::AppConfig;
use export::{Chart, GraphExporter};
use hierarchy::{HierarchyBuilder, HierarchyGraph};
use layout::{Layout, LayoutEngine};
use normalize::RecordNormalizer;
use person::Person;
use row::RawRow;

/// Builder for turning rows into org charts.
///
/// Each stage is also available on its own, so callers can inspect the
/// hierarchy or the layout before exporting.
///
/// # Examples
///
/// ```
/// use orgchart::{ChartBuilder, row::RawRow};
///
/// let rows = vec![
///     RawRow::new()
///         .with("Handle", "ceo")
///         .with("Name", "Chief")
///         .with("ReportsTo", "")
///         .with("Image", "ceo.png"),
///     RawRow::new()
///         .with("Handle", "cto")
///         .with("Name", "Tech")
///         .with("ReportsTo", "ceo")
///         .with("Image", "cto.png"),
/// ];
///
/// let chart = ChartBuilder::default().build(&rows).unwrap();
/// assert_eq!(chart.nodes().len(), 2);
/// assert_eq!(chart.edges().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    config: AppConfig,
}

impl ChartBuilder {
    /// Create a new chart builder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the configuration is unusable,
    /// such as a non-positive spacing.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Normalizes raw rows into people.
    ///
    /// # Errors
    ///
    /// Returns [`OrgChartError::Validation`] for missing columns, missing
    /// required fields or duplicate ids.
    pub fn normalize(&self, rows: &[RawRow]) -> Result<Vec<Person>, OrgChartError> {
        let people = RecordNormalizer::new(self.config.columns()).normalize(rows)?;
        Ok(people)
    }

    /// Builds the validated hierarchy for `people`.
    ///
    /// # Errors
    ///
    /// Returns [`OrgChartError::Hierarchy`] for dangling managers (unless
    /// demoted by configuration) and reporting cycles.
    pub fn build_hierarchy(&self, people: &[Person]) -> Result<HierarchyGraph, OrgChartError> {
        let hierarchy = HierarchyBuilder::new(self.config.hierarchy()).build(people)?;
        Ok(hierarchy)
    }

    /// Lays out a hierarchy.
    pub fn layout<'a>(&self, hierarchy: &'a HierarchyGraph) -> Layout<'a> {
        LayoutEngine::new(*self.config.layout()).calculate(hierarchy)
    }

    /// Exports a laid-out hierarchy as a chart.
    pub fn export(&self, hierarchy: &HierarchyGraph, layout: &Layout<'_>) -> Chart {
        GraphExporter::new(*self.config.export()).export(layout, hierarchy.edges())
    }

    /// Runs the whole pipeline.
    ///
    /// Either every stage succeeds and a complete chart is returned, or the
    /// first error is returned and nothing else.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] or [`HierarchyError`] raised.
    pub fn build(&self, rows: &[RawRow]) -> Result<Chart, OrgChartError> {
        info!(rows = rows.len(); "Building chart");

        let people = self.normalize(rows)?;
        let hierarchy = self.build_hierarchy(&people)?;
        let layout = self.layout(&hierarchy);
        let chart = self.export(&hierarchy, &layout);

        debug!(
            nodes = chart.nodes().len(),
            edges = chart.edges().len();
            "Chart built"
        );
        Ok(chart)
    }

    /// Serializes a chart to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`OrgChartError::Export`] if serialization fails.
    pub fn render_json(&self, chart: &Chart) -> Result<String, OrgChartError> {
        serde_json::to_string_pretty(chart).map_err(|err| OrgChartError::Export(Box::new(err)))
    }
}

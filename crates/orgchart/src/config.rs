//! Configuration types for chart construction.
//!
//! This module provides configuration structures that control how rows are
//! read, how the hierarchy treats unresolved references, how the chart is
//! laid out, and how nodes are labelled on export. All types implement
//! [`serde::Deserialize`] so they can be loaded from TOML or any other
//! serde format; every section and field falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`LayoutConfig`] - Spacing constants for the tidy-tree layout.
//! - [`ColumnMapping`] - Input column names for each person field.
//! - [`HierarchyConfig`] - Policy for manager references that do not resolve.
//! - [`ExportConfig`] - Label formatting for exported nodes.
//!
//! # Example
//!
//! ```
//! # use orgchart::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.columns().id(), "Handle");
//! assert_eq!(config.layout().level_separation(), 150.0);
//! ```

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level configuration combining every section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Input column mapping section.
    #[serde(default)]
    columns: ColumnMapping,

    /// Hierarchy validation section.
    #[serde(default)]
    hierarchy: HierarchyConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        layout: LayoutConfig,
        columns: ColumnMapping,
        hierarchy: HierarchyConfig,
        export: ExportConfig,
    ) -> Self {
        Self {
            layout,
            columns,
            hierarchy,
            export,
        }
    }

    /// Replaces the layout section.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Replaces the column mapping section.
    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    /// Replaces the hierarchy section.
    pub fn with_hierarchy(mut self, hierarchy: HierarchyConfig) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    /// Replaces the export section.
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the column mapping.
    pub fn columns(&self) -> &ColumnMapping {
        &self.columns
    }

    /// Returns the hierarchy configuration.
    pub fn hierarchy(&self) -> &HierarchyConfig {
        &self.hierarchy
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Checks every section for values the pipeline cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.columns.validate()
    }
}

/// Spacing constants for the tidy-tree layout.
///
/// All values are in chart units and must be positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical distance between consecutive depth levels.
    level_separation: f32,

    /// Width of a single leaf slot; adjacent siblings are this far apart.
    node_spacing: f32,

    /// Horizontal gap between separate root trees.
    tree_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            level_separation: 150.0,
            node_spacing: 120.0,
            tree_spacing: 200.0,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `level_separation` - Vertical gap between depth levels.
    /// * `node_spacing` - Horizontal width of one sibling slot.
    /// * `tree_spacing` - Horizontal gap between root trees.
    pub fn new(level_separation: f32, node_spacing: f32, tree_spacing: f32) -> Self {
        Self {
            level_separation,
            node_spacing,
            tree_spacing,
        }
    }

    /// Returns the vertical gap between depth levels.
    pub fn level_separation(&self) -> f32 {
        self.level_separation
    }

    /// Returns the width of one sibling slot.
    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }

    /// Returns the gap between root trees.
    pub fn tree_spacing(&self) -> f32 {
        self.tree_spacing
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("layout.level_separation", self.level_separation),
            ("layout.node_spacing", self.node_spacing),
            ("layout.tree_spacing", self.tree_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "`{field}` must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Names of the input columns holding each person field.
///
/// Defaults follow the spreadsheet convention `Handle`, `Name`,
/// `ReportsTo`, `Image`, `Tags`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    id: String,
    name: String,
    manager: String,
    image: String,
    tags: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            id: "Handle".to_string(),
            name: "Name".to_string(),
            manager: "ReportsTo".to_string(),
            image: "Image".to_string(),
            tags: "Tags".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Creates a mapping with explicit column names.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        manager: impl Into<String>,
        image: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            manager: manager.into(),
            image: image.into(),
            tags: tags.into(),
        }
    }

    /// Returns the column holding the person id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the column holding the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column holding the manager id.
    pub fn manager(&self) -> &str {
        &self.manager
    }

    /// Returns the column holding the image reference.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the column holding the comma-separated tags.
    pub fn tags(&self) -> &str {
        &self.tags
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("columns.id", &self.id),
            ("columns.name", &self.name),
            ("columns.manager", &self.manager),
            ("columns.image", &self.image),
            ("columns.tags", &self.tags),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "`{field}` must name a column"
                )));
            }
        }
        Ok(())
    }
}

/// What to do with a manager reference that names no known person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingManagerPolicy {
    /// Fail the build with a dangling-manager error.
    #[default]
    Error,

    /// Drop the reference and make the person a root, logging a warning.
    Demote,
}

/// Hierarchy validation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    dangling_managers: DanglingManagerPolicy,
}

impl HierarchyConfig {
    /// Creates a new [`HierarchyConfig`].
    pub fn new(dangling_managers: DanglingManagerPolicy) -> Self {
        Self { dangling_managers }
    }

    /// Returns the policy for unresolved manager references.
    pub fn dangling_managers(&self) -> DanglingManagerPolicy {
        self.dangling_managers
    }
}

/// How exported node labels are built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// The display name followed by the id on its own line: `"Ada\n(ada)"`.
    #[default]
    NameWithId,

    /// The display name alone.
    Name,
}

/// Export settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    label: LabelStyle,
}

impl ExportConfig {
    /// Creates a new [`ExportConfig`].
    pub fn new(label: LabelStyle) -> Self {
        Self { label }
    }

    /// Returns the label style.
    pub fn label(&self) -> LabelStyle {
        self.label
    }
}

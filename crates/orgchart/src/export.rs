//! Renderer-neutral chart export.
//!
//! [`GraphExporter`] flattens a [`Layout`] and the hierarchy's edges into a
//! [`Chart`]: plain, serializable lists of positioned nodes and directed
//! edges. Rendering and styling are left to whatever consumes the chart.

use log::{debug, info};
use serde::Serialize;

use orgchart_core::{identifier::Id, person::Tags};

use crate::{
    config::{ExportConfig, LabelStyle},
    layout::{Layout, PositionedNode},
};

/// A positioned, renderer-neutral org chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    nodes: Vec<ChartNode>,
    edges: Vec<ChartEdge>,
    width: f32,
    height: f32,
}

impl Chart {
    /// Returns the nodes in input order.
    pub fn nodes(&self) -> &[ChartNode] {
        &self.nodes
    }

    /// Returns the manager-to-report edges, ordered by report input position.
    pub fn edges(&self) -> &[ChartEdge] {
        &self.edges
    }

    /// Returns the node with `id`.
    pub fn node(&self, id: &str) -> Option<&ChartNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns the chart width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the chart height.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// One exported node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartNode {
    id: Id,
    label: String,
    x: f32,
    y: f32,
    depth: usize,
    image_ref: String,
    tags: Tags,
}

impl ChartNode {
    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// A directed edge from a manager to one of their reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartEdge {
    from: Id,
    to: Id,
}

impl ChartEdge {
    pub fn new(from: Id, to: Id) -> Self {
        Self { from, to }
    }

    /// Returns the manager id.
    pub fn from(&self) -> &Id {
        &self.from
    }

    /// Returns the report id.
    pub fn to(&self) -> &Id {
        &self.to
    }
}

/// Converts layouts into [`Chart`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphExporter {
    config: ExportConfig,
}

impl GraphExporter {
    /// Creates an exporter with the given settings.
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Exports `layout` together with the `(manager, report)` pairs in `edges`.
    ///
    /// The layout and edges are assumed to come from the same hierarchy and
    /// are not checked against each other.
    pub fn export<'e>(
        &self,
        layout: &Layout<'_>,
        edges: impl IntoIterator<Item = (&'e Id, &'e Id)>,
    ) -> Chart {
        info!(nodes = layout.len(); "Exporting chart");

        let nodes: Vec<ChartNode> = layout.iter().map(|node| self.export_node(node)).collect();
        let edges: Vec<ChartEdge> = edges
            .into_iter()
            .map(|(from, to)| ChartEdge::new(from.clone(), to.clone()))
            .collect();
        let bounds = layout.bounds();

        debug!(nodes = nodes.len(), edges = edges.len(); "Chart exported");

        Chart {
            nodes,
            edges,
            width: bounds.width(),
            height: bounds.height(),
        }
    }

    fn export_node(&self, node: &PositionedNode<'_>) -> ChartNode {
        let person = node.person();
        let label = match self.config.label() {
            LabelStyle::NameWithId => format!("{}\n({})", person.name(), person.id()),
            LabelStyle::Name => person.name().to_string(),
        };

        ChartNode {
            id: node.id().clone(),
            label,
            x: node.x(),
            y: node.y(),
            depth: node.depth(),
            image_ref: person.image_ref().to_string(),
            tags: person.tags().clone(),
        }
    }
}

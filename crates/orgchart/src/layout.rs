//! Tidy-tree layout for reporting hierarchies.
//!
//! The [`LayoutEngine`] positions every node of a [`HierarchyGraph`] without
//! simulation or randomness: identical input and configuration always yield
//! identical coordinates.
//!
//! # Algorithm
//!
//! Every node owns a horizontal slot range:
//!
//! - a leaf occupies one slot of width `node_spacing`,
//! - an internal node occupies the sum of its children's ranges, with the
//!   children placed left to right in their stored order.
//!
//! A node is centered over its range, which puts a parent at the midpoint of
//! its children's combined extent. Root trees are placed left to right in
//! root order with `tree_spacing` between them. Vertically, a node sits at
//! `depth * level_separation`.
//!
//! Widths are computed in post-order and offsets in pre-order, both with
//! explicit stacks, so long management chains do not recurse.

use indexmap::IndexMap;
use log::{debug, info, trace};
use petgraph::{graph::NodeIndex, visit::DfsPostOrder};

use orgchart_core::{
    geometry::{Bounds, Point},
    identifier::Id,
    person::Person,
};

use crate::{
    config::LayoutConfig,
    hierarchy::{HierarchyGraph, HierarchyNode},
};

/// A hierarchy node with its chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedNode<'a> {
    node: &'a HierarchyNode,
    position: Point,
    subtree: Bounds,
}

impl<'a> PositionedNode<'a> {
    /// Returns the node id.
    pub fn id(&self) -> &'a Id {
        self.node.id()
    }

    /// Returns the underlying hierarchy node.
    pub fn node(&self) -> &'a HierarchyNode {
        self.node
    }

    /// Returns the person record.
    pub fn person(&self) -> &'a Person {
        self.node.person()
    }

    /// Returns the node depth.
    pub fn depth(&self) -> usize {
        self.node.depth()
    }

    /// Returns the node center.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    /// Returns the slot range of the subtree rooted here, spanning the
    /// levels from this node down to its deepest descendant.
    pub fn subtree_bounds(&self) -> Bounds {
        self.subtree
    }
}

/// The positioned nodes of a hierarchy, in input order.
#[derive(Debug, Clone, Default)]
pub struct Layout<'a> {
    nodes: IndexMap<Id, PositionedNode<'a>>,
    trees: Vec<Bounds>,
    bounds: Bounds,
}

impl<'a> Layout<'a> {
    /// Returns the positioned node for `id`.
    pub fn get(&self, id: &str) -> Option<&PositionedNode<'a>> {
        self.nodes.get(id)
    }

    /// Iterates positioned nodes in input order.
    pub fn iter(&self) -> impl Iterator<Item = &PositionedNode<'a>> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the subtree bounds of `id`.
    pub fn subtree_bounds(&self, id: &str) -> Option<Bounds> {
        self.nodes.get(id).map(PositionedNode::subtree_bounds)
    }

    /// Returns the bounds of each root tree, in root order.
    pub fn tree_bounds(&self) -> &[Bounds] {
        &self.trees
    }

    /// Returns the bounds of the whole chart.
    ///
    /// The chart starts at the origin; an empty layout has zero bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Computes tidy-tree layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

/// Per-node results of the post-order pass.
#[derive(Debug, Clone, Copy, Default)]
struct Extent {
    width: f32,
    height: usize,
}

impl LayoutEngine {
    /// Creates a layout engine with the given spacing.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Returns the spacing configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Positions every node of `hierarchy`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orgchart::{hierarchy::HierarchyBuilder, layout::LayoutEngine};
    /// # use orgchart_core::{identifier::Id, person::Person};
    /// let people = vec![
    ///     Person::new(Id::new("lead"), "Lead"),
    ///     Person::new(Id::new("a"), "A").with_manager(Id::new("lead")),
    ///     Person::new(Id::new("b"), "B").with_manager(Id::new("lead")),
    /// ];
    /// let hierarchy = HierarchyBuilder::default().build(&people).unwrap();
    ///
    /// let layout = LayoutEngine::default().calculate(&hierarchy);
    /// let lead = layout.get("lead").unwrap();
    /// let a = layout.get("a").unwrap();
    /// let b = layout.get("b").unwrap();
    /// assert_eq!(lead.x(), (a.x() + b.x()) / 2.0);
    /// assert_eq!(a.y(), 150.0);
    /// ```
    pub fn calculate<'a>(&self, hierarchy: &'a HierarchyGraph) -> Layout<'a> {
        info!(nodes = hierarchy.len(); "Calculating layout");

        if hierarchy.is_empty() {
            return Layout::default();
        }

        let root_indices: Vec<NodeIndex> = hierarchy
            .roots()
            .iter()
            .filter_map(|root| hierarchy.index_of(root.as_str()))
            .collect();

        let extents = self.measure(hierarchy, &root_indices);
        let lefts = self.place(hierarchy, &root_indices, &extents);

        let level = self.config.level_separation();
        let graph = hierarchy.graph();
        let mut nodes = IndexMap::with_capacity(hierarchy.len());

        for idx in graph.node_indices() {
            let node = &graph[idx];
            let Extent { width, height } = extents[idx.index()];
            let left = lefts[idx.index()];
            let top = node.depth() as f32 * level;

            let right = left + width;
            let position = Point::new(left, top).midpoint(Point::new(right, top));
            let subtree = Bounds::new(left, top, right, top + height as f32 * level);

            trace!(
                id:% = node.id(),
                x = position.x(),
                y = position.y();
                "Positioned node"
            );

            nodes.insert(
                node.id().clone(),
                PositionedNode {
                    node,
                    position,
                    subtree,
                },
            );
        }

        let trees: Vec<Bounds> = root_indices
            .iter()
            .filter_map(|&idx| nodes.get(graph[idx].id()))
            .map(PositionedNode::subtree_bounds)
            .collect();

        let bounds = trees
            .iter()
            .fold(Bounds::default(), |acc, tree| acc.merge(tree));

        debug!(
            nodes = nodes.len(),
            trees = trees.len(),
            width = bounds.width(),
            height = bounds.height();
            "Layout calculated"
        );

        Layout {
            nodes,
            trees,
            bounds,
        }
    }

    /// Computes subtree widths and heights, children before parents.
    fn measure(&self, hierarchy: &HierarchyGraph, roots: &[NodeIndex]) -> Vec<Extent> {
        let graph = hierarchy.graph();
        let mut extents = vec![Extent::default(); graph.node_count()];

        for &root in roots {
            let mut dfs = DfsPostOrder::new(graph, root);
            while let Some(idx) = dfs.next(graph) {
                let children = child_indices(hierarchy, &graph[idx]);

                let extent = if children.is_empty() {
                    Extent {
                        width: self.config.node_spacing(),
                        height: 0,
                    }
                } else {
                    children.iter().fold(Extent::default(), |acc, child| {
                        let child = extents[child.index()];
                        Extent {
                            width: acc.width + child.width,
                            height: acc.height.max(child.height + 1),
                        }
                    })
                };
                extents[idx.index()] = extent;
            }
        }

        extents
    }

    /// Computes the left edge of every node's slot range, parents before children.
    fn place(
        &self,
        hierarchy: &HierarchyGraph,
        roots: &[NodeIndex],
        extents: &[Extent],
    ) -> Vec<f32> {
        let graph = hierarchy.graph();
        let mut lefts = vec![0.0; graph.node_count()];
        let mut stack: Vec<(NodeIndex, f32)> = Vec::new();
        let mut cursor = 0.0;

        for &root in roots {
            stack.push((root, cursor));
            cursor += extents[root.index()].width + self.config.tree_spacing();

            while let Some((idx, left)) = stack.pop() {
                lefts[idx.index()] = left;

                let mut child_left = left;
                for child in child_indices(hierarchy, &graph[idx]) {
                    stack.push((child, child_left));
                    child_left += extents[child.index()].width;
                }
            }
        }

        lefts
    }
}

fn child_indices(hierarchy: &HierarchyGraph, node: &HierarchyNode) -> Vec<NodeIndex> {
    node.children()
        .iter()
        .filter_map(|child| hierarchy.index_of(child.as_str()))
        .collect()
}

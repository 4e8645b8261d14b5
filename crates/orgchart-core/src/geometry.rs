//! Geometric primitives for chart layout.
//!
//! This module provides the coordinate types produced by the layout stage.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in chart space
//! - [`Bounds`] - A rectangular region defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Charts use a top-down coordinate system consistent with SVG and most
//! graph renderers:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y   (deeper levels of the hierarchy)
//! ```
//!
//! - **Origin**: Left edge of the first root tree, at the root level
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward, one level separation per depth

/// A 2D point representing a node position in chart coordinate space.
///
/// # Examples
///
/// ```
/// # use orgchart_core::geometry::Point;
/// let left = Point::new(60.0, 150.0);
/// let right = Point::new(180.0, 150.0);
///
/// let mid = left.midpoint(right);
/// assert_eq!(mid.x(), 120.0);
/// assert_eq!(mid.y(), 150.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Represents a rectangular region with minimum and maximum coordinates.
///
/// The layout stage uses bounds to describe the horizontal extent of a
/// subtree together with the vertical range of the levels it occupies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from explicit minimum and maximum coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orgchart_core::geometry::Bounds;
    /// let bounds = Bounds::new(0.0, 0.0, 240.0, 300.0);
    /// assert_eq!(bounds.width(), 240.0);
    /// assert_eq!(bounds.height(), 300.0);
    /// ```
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orgchart_core::geometry::Bounds;
    /// let left_tree = Bounds::new(0.0, 0.0, 240.0, 150.0);
    /// let right_tree = Bounds::new(440.0, 0.0, 560.0, 0.0);
    ///
    /// let combined = left_tree.merge(&right_tree);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.max_x(), 560.0);
    /// assert_eq!(combined.height(), 150.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns `true` when the horizontal extents of both bounds share
    /// interior space. Bounds that only touch at an edge do not overlap.
    pub fn overlaps_horizontally(&self, other: &Self) -> bool {
        self.min_x < other.max_x && other.min_x < self.max_x
    }

    /// Returns `true` if `x` lies within the horizontal extent, edges included.
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.min_x && x <= self.max_x
    }
}

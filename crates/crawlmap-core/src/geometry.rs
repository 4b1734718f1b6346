//! Geometric primitives for graph layout and projection.
//!
//! This module provides the small set of geometric types used by the layout
//! engine, both in unitless simulation space and in viewport space.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate, also used as a 2D vector (displacements, forces)
//! - [`Size`] - Width and height of a viewport
//! - [`Bounds`] - An axis-aligned bounding box accumulated from points
//!
//! # Coordinate System
//!
//! Viewport coordinates follow the screen convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Simulation space has no fixed origin; the layout starts every node at
//! `(0, 0)` and lets the forces spread them out.

use serde::{Deserialize, Serialize};

/// A 2D point in simulation or viewport space.
///
/// Points use `f32` coordinates and double as 2D vectors for forces and
/// displacements.
///
/// # Examples
///
/// ```
/// # use crawlmap_core::geometry::Point;
/// let a = Point::new(1.0, 2.0);
/// let b = Point::new(4.0, 6.0);
///
/// let d = b.sub_point(a);
/// assert_eq!(d.x(), 3.0);
/// assert_eq!(d.y(), 4.0);
/// assert_eq!(d.hypot(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
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

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Squared Euclidean length, without the square root.
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crawlmap_core::geometry::Point;
    /// let force = Point::new(10.0, -20.0);
    ///
    /// let step = force.scale(0.25);
    /// assert_eq!(step.x(), 2.5);
    /// assert_eq!(step.y(), -5.0);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Clamps each axis independently into `[-limit, limit]`.
    ///
    /// Unlike normalizing the vector, this keeps the two axes decoupled, so a
    /// large x component does not shrink the y component.
    pub fn clamp_axes(self, limit: f32) -> Self {
        Self {
            x: self.x.clamp(-limit, limit),
            y: self.y.clamp(-limit, limit),
        }
    }

    /// Returns true when both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of a rectangular area, typically a viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned bounding box with minimum and maximum coordinates.
///
/// Bounds are built by folding points into [`Bounds::empty`]. An empty box
/// has `min = +∞` and `max = -∞` on both axes, so its width and height are
/// negative infinity and [`Bounds::is_empty`] reports `true`.
///
/// # Examples
///
/// ```
/// # use crawlmap_core::geometry::{Bounds, Point};
/// let bounds = Bounds::from_points([Point::new(-1.0, 2.0), Point::new(3.0, -4.0)]);
///
/// assert_eq!(bounds.min_x(), -1.0);
/// assert_eq!(bounds.max_x(), 3.0);
/// assert_eq!(bounds.min_y(), -4.0);
/// assert_eq!(bounds.max_y(), 2.0);
/// assert_eq!(bounds.width(), 4.0);
///
/// assert!(Bounds::from_points([]).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates the degenerate box that contains no points.
    pub fn empty() -> Self {
        Self {
            min_x: f32::INFINITY,
            min_y: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            max_y: f32::NEG_INFINITY,
        }
    }

    /// Computes the smallest bounds enclosing all given points.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), |bounds, point| bounds.include(point))
    }

    /// Grows the bounds so that it contains `point`.
    pub fn include(self, point: Point) -> Self {
        Self {
            min_x: self.min_x.min(point.x),
            min_y: self.min_y.min(point.y),
            max_x: self.max_x.max(point.x),
            max_y: self.max_y.max(point.y),
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

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the bottom-right corner as a Point
    pub fn max_point(self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns true if no point has been folded into these bounds.
    pub fn is_empty(self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Returns true if `point` lies inside or on the edge of the bounds.
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

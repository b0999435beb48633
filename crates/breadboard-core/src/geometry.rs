//! Geometric primitives for diagram placement and routing.
//!
//! This module provides the geometric types shared by every Breadboard crate:
//! positions, sizes, bounding boxes, grid snapping and the four quarter-turn
//! rotations a component can take.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Rotation`] - A quarter-turn rotation applied about a component origin
//! - [`snap`] - Rounding a coordinate to the nearest grid line
//!
//! # Coordinate System
//!
//! Breadboard uses screen coordinates:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! Rotations are clockwise on screen, which for a Y-down system means a
//! 90° turn maps `(x, y)` to `(-y, x)`.

use std::fmt;

/// Default spacing between grid lines, in diagram units.
pub const GRID_SIZE: f32 = 20.0;

/// Rounds `value` to the nearest multiple of `grid`.
///
/// Ties are resolved to the even grid cell, so `snap(10.0, 20.0)` is `0.0`
/// and `snap(30.0, 20.0)` is `40.0`.
///
/// # Examples
///
/// ```
/// # use breadboard_core::geometry::snap;
/// assert_eq!(snap(27.0, 20.0), 20.0);
/// assert_eq!(snap(31.0, 20.0), 40.0);
/// assert_eq!(snap(-9.0, 20.0), 0.0);
/// ```
pub fn snap(value: f32, grid: f32) -> f32 {
    (value / grid).round_ties_even() * grid
}

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use breadboard_core::geometry::Point;
/// let origin = Point::new(40.0, 20.0);
/// let offset = Point::new(0.0, 12.5);
///
/// let pin = origin.add_point(offset);
/// assert_eq!(pin.x(), 40.0);
/// assert_eq!(pin.y(), 32.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
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

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point
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

    /// Snaps both coordinates to the nearest grid line.
    ///
    /// # Examples
    ///
    /// ```
    /// # use breadboard_core::geometry::Point;
    /// let snapped = Point::new(33.0, 49.0).snap_to_grid(20.0);
    /// assert_eq!(snapped, Point::new(40.0, 40.0));
    /// ```
    pub fn snap_to_grid(self, grid: f32) -> Self {
        Self {
            x: snap(self.x, grid),
            y: snap(self.y, grid),
        }
    }

    /// Returns true when both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
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

    /// Returns true if both dimensions are finite and strictly positive
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates the smallest bounds enclosing every point.
    ///
    /// Returns `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use breadboard_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::enclosing([
    ///     Point::new(10.0, 0.0),
    ///     Point::new(-5.0, 20.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(bounds.min_x(), -5.0);
    /// assert_eq!(bounds.max_y(), 20.0);
    /// ```
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let seed = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points.fold(seed, |acc, p| Self {
            min_x: acc.min_x.min(p.x),
            min_y: acc.min_y.min(p.y),
            max_x: acc.max_x.max(p.x),
            max_y: acc.max_y.max(p.y),
        }))
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

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Grows the bounds by `margin` on every side
    pub fn inflate(self, margin: f32) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Returns true if the point lies inside or on the edge of the bounds
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

/// One of the four quarter-turn orientations of a component.
///
/// Rotation is applied about the component origin (its top-left corner in
/// local coordinates) and advances clockwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Returns the rotation one quarter turn further clockwise.
    ///
    /// # Examples
    ///
    /// ```
    /// # use breadboard_core::geometry::Rotation;
    /// assert_eq!(Rotation::Deg270.next(), Rotation::Deg0);
    /// ```
    pub fn next(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Returns the angle in degrees
    pub fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Builds a rotation from an angle in degrees, if it is a multiple of 90.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Rotates a local offset about the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// # use breadboard_core::geometry::{Point, Rotation};
    /// let offset = Point::new(100.0, 25.0);
    /// assert_eq!(Rotation::Deg90.apply(offset), Point::new(-25.0, 100.0));
    /// assert_eq!(Rotation::Deg180.apply(offset), Point::new(-100.0, -25.0));
    /// ```
    pub fn apply(self, offset: Point) -> Point {
        match self {
            Self::Deg0 => offset,
            Self::Deg90 => Point::new(-offset.y, offset.x),
            Self::Deg180 => Point::new(-offset.x, -offset.y),
            Self::Deg270 => Point::new(offset.y, -offset.x),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn coordinate_strategy() -> impl Strategy<Value = f32> {
        -10_000.0f32..10_000.0
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (coordinate_strategy(), coordinate_strategy()).prop_map(|(x, y)| Point::new(x, y))
    }

    fn rotation_strategy() -> impl Strategy<Value = Rotation> {
        prop_oneof![
            Just(Rotation::Deg0),
            Just(Rotation::Deg90),
            Just(Rotation::Deg180),
            Just(Rotation::Deg270),
        ]
    }

    /// Snapping an already snapped value leaves it unchanged.
    fn check_snap_is_idempotent(value: f32) -> Result<(), TestCaseError> {
        let once = snap(value, GRID_SIZE);
        let twice = snap(once, GRID_SIZE);
        prop_assert_eq!(once, twice);
        Ok(())
    }

    /// A snapped value never moves by more than half a grid cell.
    fn check_snap_stays_within_half_cell(value: f32) -> Result<(), TestCaseError> {
        let snapped = snap(value, GRID_SIZE);
        prop_assert!((snapped - value).abs() <= GRID_SIZE / 2.0 + 0.01);
        Ok(())
    }

    /// Four quarter turns bring an offset back to where it started.
    fn check_full_turn_is_identity(p: Point) -> Result<(), TestCaseError> {
        let rotated = (0..4).fold(p, |acc, _| Rotation::Deg90.apply(acc));
        prop_assert!(approx_eq!(f32, rotated.x(), p.x()));
        prop_assert!(approx_eq!(f32, rotated.y(), p.y()));
        Ok(())
    }

    /// Rotation preserves the distance from the origin.
    fn check_rotation_preserves_length(p: Point, rotation: Rotation) -> Result<(), TestCaseError> {
        let origin = Point::default();
        let before = p.distance(origin);
        let after = rotation.apply(p).distance(origin);
        prop_assert!(approx_eq!(f32, before, after, epsilon = 0.01));
        Ok(())
    }

    proptest! {
        #[test]
        fn snap_is_idempotent(value in coordinate_strategy()) {
            check_snap_is_idempotent(value)?;
        }

        #[test]
        fn snap_stays_within_half_cell(value in coordinate_strategy()) {
            check_snap_stays_within_half_cell(value)?;
        }

        #[test]
        fn full_turn_is_identity(p in point_strategy()) {
            check_full_turn_is_identity(p)?;
        }

        #[test]
        fn rotation_preserves_length(p in point_strategy(), rotation in rotation_strategy()) {
            check_rotation_preserves_length(p, rotation)?;
        }
    }
}

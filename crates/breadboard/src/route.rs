//! Orthogonal routing between two pins.
//!
//! The router is deliberately simple: it draws a straight segment when the
//! endpoints share an axis and a single bend otherwise. It does not avoid
//! obstacles and does not search for a shortest path. Given the same two
//! endpoints it always yields the same polyline.

use breadboard_core::geometry::{Bounds, Point};

/// Polyline geometry of a connection.
///
/// Holds at least two points; consecutive points differ in one coordinate
/// only.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    points: Vec<Point>,
}

impl Route {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Consecutive point pairs forming the route's segments
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Interior points where the route changes direction
    pub fn bends(&self) -> &[Point] {
        &self.points[1..self.points.len() - 1]
    }

    /// Total length of all segments
    pub fn length(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::enclosing(self.points.iter().copied()).unwrap_or_default()
    }

    /// Returns true if `point` lies within `tolerance` of any segment.
    pub fn is_near(&self, point: Point, tolerance: f32) -> bool {
        self.segments()
            .any(|(a, b)| distance_to_segment(point, a, b) <= tolerance)
    }
}

/// Computes the orthogonal route from `from` to `to`.
///
/// - Same x: one vertical segment, drawn top to bottom.
/// - Same y: one horizontal segment, drawn left to right.
/// - Otherwise one bend. When `from` is left of `to` the route leaves
///   vertically and bends at `(from.x, to.y)`; when it is right of `to` it
///   leaves horizontally and bends at `(to.x, from.y)`.
///
/// # Examples
///
/// ```
/// # use breadboard::route::orthogonal;
/// # use breadboard::geometry::Point;
/// let route = orthogonal(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
/// assert_eq!(route.bends(), &[Point::new(0.0, 5.0)]);
///
/// let route = orthogonal(Point::new(0.0, 9.0), Point::new(0.0, 2.0));
/// assert_eq!(route.points(), &[Point::new(0.0, 2.0), Point::new(0.0, 9.0)]);
/// ```
pub fn orthogonal(from: Point, to: Point) -> Route {
    let (x1, y1) = (from.x(), from.y());
    let (x2, y2) = (to.x(), to.y());

    let points = if x1 == x2 {
        vec![Point::new(x1, y1.min(y2)), Point::new(x1, y1.max(y2))]
    } else if y1 == y2 {
        vec![Point::new(x1.min(x2), y1), Point::new(x1.max(x2), y2)]
    } else if x1 < x2 {
        vec![from, Point::new(x1, y2), to]
    } else {
        vec![from, Point::new(x2, y1), to]
    };

    Route { points }
}

fn distance_to_segment(point: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x() - a.x(), b.y() - a.y());
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return point.distance(a);
    }
    let t = (((point.x() - a.x()) * dx + (point.y() - a.y()) * dy) / length_sq).clamp(0.0, 1.0);
    point.distance(Point::new(a.x() + t * dx, a.y() + t * dy))
}

#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Canvas coordinates are zoomed device pixels, so everything here is
//! float-based. Origin is at the top-left, y grows downward.

/// A point in canvas or screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The coordinate along the given axis.
    #[inline]
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectF {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width (non-negative).
    pub width: f32,
    /// Height (non-negative).
    pub height: f32,
}

impl RectF {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with the given size.
    #[inline]
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub const fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Area.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Center point.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Midpoint coordinate along the given axis.
    #[inline]
    #[must_use]
    pub const fn midpoint(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x + self.width / 2.0,
            Axis::Vertical => self.y + self.height / 2.0,
        }
    }

    /// Check if a point is inside the rectangle.
    ///
    /// Left/top edges are inclusive, right/bottom exclusive, matching
    /// hit-test conventions.
    #[inline]
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Compute the intersection with another rectangle, `None` if disjoint.
    #[must_use]
    pub fn intersection(&self, other: &RectF) -> Option<RectF> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(RectF::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

/// Layout axis of a container.
///
/// Row-like containers lay children out horizontally; everything else is
/// vertical. Static per widget kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom (default).
    #[default]
    Vertical,
}

#[cfg(test)]
mod tests {
    use super::{Axis, Point, RectF};

    #[test]
    fn rect_contains_edges() {
        let rect = RectF::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains(Point::new(2.0, 3.0)));
        assert!(rect.contains(Point::new(5.9, 7.9)));
        assert!(!rect.contains(Point::new(6.0, 3.0)));
        assert!(!rect.contains(Point::new(2.0, 8.0)));
    }

    #[test]
    fn rect_contains_empty_rect() {
        let rect = RectF::new(5.0, 5.0, 0.0, 0.0);
        assert!(!rect.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn rect_center_and_midpoints() {
        let rect = RectF::new(10.0, 20.0, 4.0, 8.0);
        assert_eq!(rect.center(), Point::new(12.0, 24.0));
        assert_eq!(rect.midpoint(Axis::Horizontal), 12.0);
        assert_eq!(rect.midpoint(Axis::Vertical), 24.0);
    }

    #[test]
    fn rect_intersection_overlaps() {
        let a = RectF::new(0.0, 0.0, 4.0, 4.0);
        let b = RectF::new(2.0, 2.0, 4.0, 4.0);
        assert_eq!(a.intersection(&b), Some(RectF::new(2.0, 2.0, 2.0, 2.0)));
    }

    #[test]
    fn rect_intersection_disjoint_is_none() {
        let a = RectF::new(0.0, 0.0, 2.0, 2.0);
        let b = RectF::new(3.0, 3.0, 2.0, 2.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn rect_adjacent_no_overlap() {
        // Rects share an edge but don't overlap (right edge is exclusive)
        let a = RectF::new(0.0, 0.0, 5.0, 5.0);
        let b = RectF::new(5.0, 0.0, 5.0, 5.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn rect_is_empty() {
        assert!(RectF::new(0.0, 0.0, 0.0, 10.0).is_empty());
        assert!(RectF::new(0.0, 0.0, 10.0, 0.0).is_empty());
        assert!(!RectF::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn rect_from_size() {
        let r = RectF::from_size(390.0, 844.0);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 0.0);
        assert_eq!(r.area(), 390.0 * 844.0);
    }

    #[test]
    fn point_along_axis() {
        let p = Point::new(3.0, 7.0);
        assert_eq!(p.along(Axis::Horizontal), 3.0);
        assert_eq!(p.along(Axis::Vertical), 7.0);
    }

    #[test]
    fn axis_default_is_vertical() {
        assert_eq!(Axis::default(), Axis::Vertical);
    }
}

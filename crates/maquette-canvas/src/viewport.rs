#![forbid(unsafe_code)]

//! Screen-to-canvas coordinate mapping.
//!
//! The design canvas renders inside a device frame on screen, scaled by a
//! zoom factor. Pointer events arrive in screen coordinates; hit-testing
//! and drop zones live in canvas coordinates. [`Viewport`] is the single
//! translation point between the two spaces.
//!
//! Invariants
//!
//! - `to_canvas` and `to_screen` are exact inverses (up to f32 rounding).
//! - Zoom is clamped to a positive minimum, so the mapping is always
//!   invertible. A zero or negative zoom cannot be constructed.

use maquette_core::geometry::{Point, RectF};

/// Smallest representable zoom. Values at or below zero are clamped here.
pub const MIN_ZOOM: f32 = 0.05;

/// The on-screen frame of the canvas plus its zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen-space rectangle the canvas occupies.
    pub frame: RectF,
    zoom: f32,
}

impl Viewport {
    /// Create a viewport. Zoom is clamped to [`MIN_ZOOM`].
    #[must_use]
    pub fn new(frame: RectF, zoom: f32) -> Self {
        Self {
            frame,
            zoom: clamp_zoom(zoom),
        }
    }

    /// Current zoom factor (always positive).
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Replace the zoom factor, clamping as in [`Viewport::new`].
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Map a screen-space point into canvas coordinates.
    #[must_use]
    pub fn to_canvas(&self, p: Point) -> Point {
        Point {
            x: (p.x - self.frame.x) / self.zoom,
            y: (p.y - self.frame.y) / self.zoom,
        }
    }

    /// Map a canvas-space point back onto the screen.
    #[must_use]
    pub fn to_screen(&self, p: Point) -> Point {
        Point {
            x: p.x * self.zoom + self.frame.x,
            y: p.y * self.zoom + self.frame.y,
        }
    }

    /// Whether a screen-space point falls inside the canvas frame.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.frame.contains(p)
    }
}

fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_finite() { zoom.max(MIN_ZOOM) } else { MIN_ZOOM }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vp(zoom: f32) -> Viewport {
        Viewport::new(
            RectF {
                x: 100.0,
                y: 50.0,
                width: 800.0,
                height: 600.0,
            },
            zoom,
        )
    }

    #[test]
    fn maps_frame_origin_to_canvas_origin() {
        let v = vp(2.0);
        let origin = v.to_canvas(Point { x: 100.0, y: 50.0 });
        assert_eq!(origin, Point { x: 0.0, y: 0.0 });
    }

    #[test]
    fn zoom_scales_coordinates() {
        let v = vp(2.0);
        let p = v.to_canvas(Point { x: 300.0, y: 150.0 });
        assert_eq!(p, Point { x: 100.0, y: 50.0 });
    }

    #[test]
    fn zero_zoom_is_clamped() {
        let v = vp(0.0);
        assert_eq!(v.zoom(), MIN_ZOOM);
        // Still invertible.
        let p = Point { x: 340.0, y: 90.0 };
        let back = v.to_screen(v.to_canvas(p));
        assert!((back.x - p.x).abs() < 1e-3);
    }

    #[test]
    fn contains_uses_screen_space() {
        let v = vp(1.0);
        assert!(v.contains(Point { x: 100.0, y: 50.0 }));
        assert!(!v.contains(Point { x: 99.0, y: 50.0 }));
        assert!(!v.contains(Point { x: 900.0, y: 650.0 }));
    }

    proptest! {
        #[test]
        fn round_trips_within_tolerance(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            zoom in 0.05f32..8.0,
        ) {
            let v = vp(zoom);
            let p = Point { x, y };
            let back = v.to_screen(v.to_canvas(p));
            prop_assert!((back.x - x).abs() < 0.01);
            prop_assert!((back.y - y).abs() < 0.01);
        }
    }
}

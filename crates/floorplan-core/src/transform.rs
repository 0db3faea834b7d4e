//! World, canvas and screen coordinate transforms.
//!
//! World space is measured in feet. Canvas space is world space scaled by a fixed
//! `pixels_per_foot`. Screen space is canvas space scaled by the interactive zoom and shifted by
//! the pan offset.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Canvas pixels per world foot used when a project does not specify one.
pub const DEFAULT_PIXELS_PER_FOOT: f64 = 20.0;
/// Smallest zoom accepted by [`ViewContext::zoom_at`].
pub const MIN_ZOOM: f64 = 0.1;
/// Largest zoom accepted by [`ViewContext::zoom_at`].
pub const MAX_ZOOM: f64 = 20.0;

/// The view parameters every conversion depends on.
///
/// This is passed explicitly into each call that needs it; the core keeps no view state of
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewContext {
    /// Fixed world → canvas scale.
    pub pixels_per_foot: f64,
    /// Interactive canvas → screen scale.
    pub zoom: f64,
    /// Pan offset in screen pixels.
    pub offset: Vec2,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self {
            pixels_per_foot: DEFAULT_PIXELS_PER_FOOT,
            zoom: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl ViewContext {
    /// Create a view with the given scale, zoom and pan offset.
    pub fn new(pixels_per_foot: f64, zoom: f64, offset: Vec2) -> Self {
        Self {
            pixels_per_foot,
            zoom,
            offset,
        }
    }

    /// Convert a world point (feet) to canvas pixels.
    pub fn world_to_canvas(&self, p: Point) -> Point {
        Point::new(p.x * self.pixels_per_foot, p.y * self.pixels_per_foot)
    }

    /// Convert a canvas point back to world feet.
    pub fn canvas_to_world(&self, p: Point) -> Point {
        Point::new(p.x / self.pixels_per_foot, p.y / self.pixels_per_foot)
    }

    /// Convert a canvas point to screen pixels.
    pub fn canvas_to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.zoom + self.offset.x,
            p.y * self.zoom + self.offset.y,
        )
    }

    /// Convert a screen point to canvas pixels.
    pub fn screen_to_canvas(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset.x) / self.zoom,
            (p.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert a world point straight to screen pixels.
    pub fn world_to_screen(&self, p: Point) -> Point {
        self.canvas_to_screen(self.world_to_canvas(p))
    }

    /// Convert a screen point (e.g. a pointer position) to world feet.
    pub fn screen_to_world(&self, p: Point) -> Point {
        self.canvas_to_world(self.screen_to_canvas(p))
    }

    /// World length covered by one screen pixel at the current zoom.
    pub fn feet_per_screen_pixel(&self) -> f64 {
        1.0 / (self.pixels_per_foot * self.zoom)
    }

    /// Affine transform from canvas to screen, for the renderer.
    pub fn screen_transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Pan the view by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor` about a screen point, which stays over the same world point. The
    /// resulting zoom is clamped to [`MIN_ZOOM`, `MAX_ZOOM`].
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = zoom / self.zoom;
        // offset' = s - (s - offset) * ratio
        self.offset = screen_point.to_vec2() - (screen_point.to_vec2() - self.offset) * ratio;
        self.zoom = zoom;
    }
}

/// Euclidean distance between two points.
pub fn distance_to_point(p: Point, q: Point) -> f64 {
    (p - q).hypot()
}

/// Distance from `p` to the segment `a`→`b`, clamping the projection onto the segment.
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let len_sq = seg.hypot2();
    if len_sq == 0.0 {
        return distance_to_point(p, a);
    }
    let t = ((p - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    distance_to_point(p, a + seg * t)
}

/// Format a non-negative length in feet as `feet'inches"`, rounding to the nearest inch.
pub fn format_feet_inches(length_feet: f64) -> String {
    let mut feet = length_feet.floor();
    let mut inches = ((length_feet - feet) * 12.0).round();
    if inches >= 12.0 {
        feet += 1.0;
        inches = 0.0;
    }
    format!("{}'{}\"", feet as i64, inches as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn test_default_view() {
        let view = ViewContext::default();
        assert_eq!(view.offset, Vec2::ZERO);
        assert!((view.zoom - 1.0).abs() < f64::EPSILON);
        assert!((view.pixels_per_foot - DEFAULT_PIXELS_PER_FOOT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_world_canvas_roundtrip() {
        let view = ViewContext::new(37.5, 1.0, Vec2::ZERO);
        for p in [
            Point::new(0.0, 0.0),
            Point::new(3.2, -4.7),
            Point::new(-1234.5678, 98765.4321),
            Point::new(1e-7, 1e7),
        ] {
            let canvas = view.world_to_canvas(p);
            let back = view.canvas_to_world(canvas);
            assert!((back.x - p.x).abs() <= p.x.abs() * 1e-12 + EPS);
            assert!((back.y - p.y).abs() <= p.y.abs() * 1e-12 + EPS);
        }
    }

    #[test]
    fn test_canvas_screen_roundtrip() {
        let view = ViewContext::new(20.0, 2.5, Vec2::new(30.0, -20.0));
        let original = Point::new(123.0, 456.0);
        let screen = view.canvas_to_screen(original);
        assert!(close(screen, Point::new(337.5, 1120.0)));
        assert!(close(view.screen_to_canvas(screen), original));
    }

    #[test]
    fn test_world_screen_composition() {
        let view = ViewContext::new(10.0, 2.0, Vec2::new(5.0, 7.0));
        let world = Point::new(1.5, -2.0);
        let screen = view.world_to_screen(world);
        assert!(close(screen, Point::new(35.0, -33.0)));
        assert!(close(view.screen_to_world(screen), world));
    }

    #[test]
    fn test_screen_transform_matches_conversion() {
        let view = ViewContext::new(20.0, 1.75, Vec2::new(-12.0, 40.0));
        let p = Point::new(64.0, -8.0);
        assert!(close(view.screen_transform() * p, view.canvas_to_screen(p)));
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut view = ViewContext::default();
        let anchor = Point::new(200.0, 150.0);
        let before = view.screen_to_world(anchor);
        view.zoom_at(anchor, 2.0);
        assert!((view.zoom - 2.0).abs() < f64::EPSILON);
        assert!(close(view.world_to_screen(before), anchor));
    }

    #[test]
    fn test_zoom_clamp() {
        let mut view = ViewContext::default();
        view.zoom_at(Point::ZERO, 0.0001);
        assert!((view.zoom - MIN_ZOOM).abs() < f64::EPSILON);
        view.zoom_at(Point::ZERO, 1e6);
        assert!((view.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_at_offset() {
        let mut view = ViewContext::default();
        view.zoom_at(Point::new(100.0, 40.0), 2.0);
        assert!((view.offset.x + 100.0).abs() < EPS);
        assert!((view.offset.y + 40.0).abs() < EPS);

        // Already at the limit: nothing moves
        view.zoom = MAX_ZOOM;
        let offset = view.offset;
        view.zoom_at(Point::new(7.0, 9.0), 3.0);
        assert_eq!(view.offset, offset);
    }

    #[test]
    fn test_pan() {
        let mut view = ViewContext::default();
        view.pan(Vec2::new(10.0, 20.0));
        assert_eq!(view.offset, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_distance_to_point() {
        let d = distance_to_point(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < EPS);
    }

    #[test]
    fn test_distance_to_segment_interior_and_clamped() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((distance_point_to_segment(Point::new(5.0, 3.0), a, b) - 3.0).abs() < EPS);
        // Beyond the end the distance is to the endpoint
        assert!((distance_point_to_segment(Point::new(13.0, 4.0), a, b) - 5.0).abs() < EPS);
        assert!((distance_point_to_segment(Point::new(-3.0, -4.0), a, b) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_distance_to_degenerate_segment() {
        let a = Point::new(2.0, -1.0);
        for p in [Point::new(0.0, 0.0), Point::new(2.0, -1.0), Point::new(-7.5, 3.25)] {
            assert_eq!(distance_point_to_segment(p, a, a), distance_to_point(p, a));
        }
    }

    #[test]
    fn test_format_feet_inches() {
        assert_eq!(format_feet_inches(0.0), "0'0\"");
        assert_eq!(format_feet_inches(10.5), "10'6\"");
        assert_eq!(format_feet_inches(3.25), "3'3\"");
    }

    #[test]
    fn test_format_feet_inches_carry() {
        assert_eq!(format_feet_inches(2.999_999_9), "3'0\"");
        assert_eq!(format_feet_inches(4.97), "5'0\"");
    }
}

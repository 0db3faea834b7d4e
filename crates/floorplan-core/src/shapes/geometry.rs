//! Canvas-space geometry derived from a shape's model data.

use super::{Shape, ShapeKind};
use kurbo::{BezPath, Point, Rect, Vec2};

/// Oriented rectangle of a shape in canvas pixels. Recomputed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeGeometry {
    /// Start point in canvas pixels.
    pub start: Point,
    /// End point in canvas pixels.
    pub end: Point,
    /// Unit vector from start to end.
    pub tangent: Vec2,
    /// Unit normal, `(-ty, tx)`.
    pub normal: Vec2,
    /// Segment length in feet.
    pub length: f64,
    /// Rectangle corners: one long side start→end, then the other side end→start.
    pub corners: [Point; 4],
}

impl ShapeGeometry {
    /// Closed polygon through the corners.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.corners[0]);
        for corner in &self.corners[1..] {
            path.line_to(*corner);
        }
        path.close_path();
        path
    }

    /// Axis-aligned bounds of the corners.
    pub fn bounds(&self) -> Rect {
        let (min_x, max_x) = self
            .corners
            .iter()
            .fold((f64::MAX, f64::MIN), |(mn, mx), p| (mn.min(p.x), mx.max(p.x)));
        let (min_y, max_y) = self
            .corners
            .iter()
            .fold((f64::MAX, f64::MIN), |(mn, mx), p| (mn.min(p.y), mx.max(p.y)));
        Rect::new(min_x, min_y, max_x, max_y)
    }
}

/// Derive the canvas-space rectangle of a shape.
///
/// Returns `None` when the endpoints coincide. Dimensions collapse to their centerline.
pub fn geometry(shape: &Shape, pixels_per_foot: f64) -> Option<ShapeGeometry> {
    let d = shape.end - shape.start;
    let length = d.hypot();
    if length == 0.0 {
        return None;
    }

    let tangent = d / length;
    let normal = Vec2::new(-tangent.y, tangent.x);

    let thickness = match shape.kind {
        ShapeKind::Dimension => 0.0,
        _ => shape.thickness,
    };
    let half = normal * (thickness / 2.0 * pixels_per_foot);

    let start = Point::new(shape.start.x * pixels_per_foot, shape.start.y * pixels_per_foot);
    let end = start + tangent * (length * pixels_per_foot);

    Some(ShapeGeometry {
        start,
        end,
        tangent,
        normal,
        length,
        corners: [start + half, end + half, end - half, start - half],
    })
}

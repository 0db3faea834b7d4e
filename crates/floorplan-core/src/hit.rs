//! Pointer hit-testing against endpoint handles and shape bodies.

use crate::shapes::Shape;
use crate::transform::{ViewContext, distance_point_to_segment, distance_to_point};
use kurbo::Point;

/// Radius of an endpoint drag handle in screen pixels.
pub const ENDPOINT_HIT_PIXELS: f64 = 8.0;
/// Default body pick radius in screen pixels.
pub const DEFAULT_PICK_TOLERANCE_PIXELS: f64 = 10.0;

/// Which end of a shape a handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// (x1, y1)
    Start,
    /// (x2, y2)
    End,
}

impl Endpoint {
    /// Handle number as the host UI counts them (1 = start, 2 = end).
    pub fn number(self) -> u8 {
        match self {
            Endpoint::Start => 1,
            Endpoint::End => 2,
        }
    }
}

/// Result of resolving a pointer against the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// A drag handle of the shape at `index`.
    Endpoint { index: usize, end: Endpoint },
    /// The body of the shape at `index`.
    Body(usize),
}

/// Endpoint handle radius in world feet. Shrinks as the view zooms in.
pub fn endpoint_tolerance(view: &ViewContext) -> f64 {
    ENDPOINT_HIT_PIXELS * view.feet_per_screen_pixel()
}

/// Test a world point against a shape's two endpoint handles. The start handle wins when
/// both are in range.
pub fn hit_shape_endpoint(point: Point, shape: &Shape, view: &ViewContext) -> Option<Endpoint> {
    let tolerance = endpoint_tolerance(view);
    if distance_to_point(point, shape.start) < tolerance {
        Some(Endpoint::Start)
    } else if distance_to_point(point, shape.end) < tolerance {
        Some(Endpoint::End)
    } else {
        None
    }
}

/// Find the shape body closest to a world point.
///
/// Shapes whose endpoint handles contain the point are skipped, since those belong to the
/// handle drag. Thicker shapes get a bonus of a quarter of their thickness, but the recorded
/// best distance stays the raw one. Earlier shapes win ties.
pub fn hit_test(
    point: Point,
    shapes: &[Shape],
    view: &ViewContext,
    pick_tolerance_pixels: f64,
) -> Option<usize> {
    let mut best = pick_tolerance_pixels * view.feet_per_screen_pixel();
    let mut hit = None;
    for (i, shape) in shapes.iter().enumerate() {
        if hit_shape_endpoint(point, shape, view).is_some() {
            continue;
        }
        let d = distance_point_to_segment(point, shape.start, shape.end);
        if d < best + shape.thickness / 4.0 {
            best = d;
            hit = Some(i);
        }
    }
    log::debug!("Hit test at ({:.2}, {:.2}) -> {:?}", point.x, point.y, hit);
    hit
}

/// Resolve a pointer the way the editor does: endpoint handles first, in collection order,
/// then shape bodies.
pub fn pick(
    point: Point,
    shapes: &[Shape],
    view: &ViewContext,
    pick_tolerance_pixels: f64,
) -> Option<Pick> {
    shapes
        .iter()
        .enumerate()
        .find_map(|(index, shape)| {
            hit_shape_endpoint(point, shape, view).map(|end| Pick::Endpoint { index, end })
        })
        .or_else(|| hit_test(point, shapes, view, pick_tolerance_pixels).map(Pick::Body))
}

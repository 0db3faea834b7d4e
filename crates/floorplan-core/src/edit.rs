//! Editing operations on a single shape: move, resize, orthogonalize, rotate, flip.
//!
//! These mutate in place and never talk to the host. [`crate::Editor`] wraps them with the
//! undo-checkpoint and repaint calls.

use crate::error::ParseError;
use crate::shapes::{Shape, ShapeKind};
use kurbo::{Affine, Vec2};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Distance of one keyboard nudge, in feet (3 inches).
pub const DEFAULT_MOVE_STEP: f64 = 0.25;

/// Cardinal direction on the plan. `Up` is towards negative y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit vector pointing this way.
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
        }
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(ParseError::Direction(other.to_string())),
        }
    }
}

/// The point held fixed while a shape is resized or straightened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    #[serde(rename = "S")]
    Start,
    #[serde(rename = "E")]
    End,
    #[serde(rename = "C")]
    Center,
}

impl FromStr for Anchor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" | "start" => Ok(Anchor::Start),
            "E" | "end" => Ok(Anchor::End),
            "C" | "center" => Ok(Anchor::Center),
            other => Err(ParseError::Anchor(other.to_string())),
        }
    }
}

/// Mirror axis for [`flip`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FlipAxis {
    /// Mirror x (left/right).
    #[default]
    Horizontal,
    /// Mirror y (top/bottom).
    Vertical,
}

/// Nudge a shape by `step` feet. Any grid alignment is lost.
pub fn move_shape(shape: &mut Shape, direction: Direction, step: f64) {
    shape.translate(direction.unit() * step);
    shape.snap.clear();
}

/// Rescale a shape to `length` feet along its current direction.
///
/// Returns false, leaving the shape untouched, when `length` is not finite or the shape has
/// zero length.
pub fn change_length(shape: &mut Shape, length: f64, anchor: Anchor) -> bool {
    if !length.is_finite() {
        return false;
    }
    let current = shape.length();
    if current == 0.0 {
        return false;
    }
    let dir = (shape.end - shape.start) / current;
    place(shape, anchor, dir * length);
    true
}

/// Make a shape exactly horizontal, keeping its length and left/right sense.
pub fn make_horizontal(shape: &mut Shape, anchor: Anchor) -> bool {
    straighten(shape, anchor, Vec2::new(1.0, 0.0))
}

/// Make a shape exactly vertical, keeping its length and up/down sense.
pub fn make_vertical(shape: &mut Shape, anchor: Anchor) -> bool {
    straighten(shape, anchor, Vec2::new(0.0, 1.0))
}

fn straighten(shape: &mut Shape, anchor: Anchor, axis: Vec2) -> bool {
    let r = shape.length();
    if r == 0.0 {
        return false;
    }
    let sign = if (shape.end - shape.start).dot(axis) < 0.0 {
        -1.0
    } else {
        1.0
    };
    place(shape, anchor, axis * (sign * r));
    true
}

/// Set the start→end vector of a shape to `span`, holding the anchor point.
fn place(shape: &mut Shape, anchor: Anchor, span: Vec2) {
    match anchor {
        Anchor::Start => shape.end = shape.start + span,
        Anchor::End => shape.start = shape.end - span,
        Anchor::Center => {
            let center = shape.midpoint();
            shape.start = center - span / 2.0;
            shape.end = center + span / 2.0;
        }
    }
}

/// Point a shape at an absolute angle (radians from +x) about its center, keeping its length.
pub fn rotate(shape: &mut Shape, angle: f64) {
    let center = shape.midpoint();
    let half = Vec2::from_angle(angle) * (shape.length() / 2.0);
    shape.start = center - half;
    shape.end = center + half;
}

/// Flip a shape about its own center.
///
/// Doors only flip horizontally, and only their swing changes. Returns whether anything
/// changed.
pub fn flip(shape: &mut Shape, axis: FlipAxis) -> bool {
    if let ShapeKind::Door { swing } = &mut shape.kind {
        if axis == FlipAxis::Horizontal {
            *swing = !*swing;
            return true;
        }
        return false;
    }

    let center = shape.midpoint().to_vec2();
    let (sx, sy) = match axis {
        FlipAxis::Horizontal => (-1.0, 1.0),
        FlipAxis::Vertical => (1.0, -1.0),
    };
    let mirror = Affine::translate(center)
        * Affine::scale_non_uniform(sx, sy)
        * Affine::translate(-center);
    shape.start = mirror * shape.start;
    shape.end = mirror * shape.end;
    true
}

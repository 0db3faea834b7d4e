//! Shape definitions for the floor plan.

mod color;
mod geometry;

pub use color::{
    DEFAULT_COLOR, DOOR_COLOR, WALL_COLOR, WINDOW_COLOR, default_color_for_type, parse_hex_color,
};
pub use geometry::{ShapeGeometry, geometry};

use crate::error::ParseError;
use crate::transform::distance_to_point;
use kurbo::{Point, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a shape: `"e"` followed by seven base-36 characters.
pub type ShapeId = String;

const ID_LEN: u32 = 7;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh shape id. Uniqueness is probabilistic; collisions are not checked.
pub(crate) fn generate_id() -> ShapeId {
    let mut n = Uuid::new_v4().as_u128() % 36u128.pow(ID_LEN);
    let mut digits = [b'0'; ID_LEN as usize];
    for digit in digits.iter_mut().rev() {
        *digit = BASE36[(n % 36) as usize];
        n /= 36;
    }
    let mut id = String::with_capacity(1 + ID_LEN as usize);
    id.push('e');
    id.extend(digits.iter().map(|&b| b as char));
    id
}

/// The closed set of shape type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Wall,
    Door,
    Window,
    Dimension,
}

impl ShapeType {
    /// Name used in project documents.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeType::Wall => "wall",
            ShapeType::Door => "door",
            ShapeType::Window => "window",
            ShapeType::Dimension => "dimension",
        }
    }

    /// Default style string for shapes of this type.
    pub fn default_color(self) -> &'static str {
        match self {
            ShapeType::Wall => WALL_COLOR,
            ShapeType::Door => DOOR_COLOR,
            ShapeType::Window => WINDOW_COLOR,
            ShapeType::Dimension => DEFAULT_COLOR,
        }
    }
}

impl FromStr for ShapeType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wall" => Ok(ShapeType::Wall),
            "door" => Ok(ShapeType::Door),
            "window" => Ok(ShapeType::Window),
            "dimension" => Ok(ShapeType::Dimension),
            other => Err(ParseError::ShapeType(other.to_string())),
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific data of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Wall,
    /// `swing` selects which endpoint carries the hinge.
    Door { swing: bool },
    Window,
    Dimension,
}

impl ShapeKind {
    pub fn shape_type(self) -> ShapeType {
        match self {
            ShapeKind::Wall => ShapeType::Wall,
            ShapeKind::Door { .. } => ShapeType::Door,
            ShapeKind::Window => ShapeType::Window,
            ShapeKind::Dimension => ShapeType::Dimension,
        }
    }
}

impl From<ShapeType> for ShapeKind {
    fn from(shape_type: ShapeType) -> Self {
        match shape_type {
            ShapeType::Wall => ShapeKind::Wall,
            ShapeType::Door => ShapeKind::Door { swing: false },
            ShapeType::Window => ShapeKind::Window,
            ShapeType::Dimension => ShapeKind::Dimension,
        }
    }
}

/// One face or end of a shape that can be aligned to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// The face on the other side of the same axis.
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Which sides of a shape are currently aligned to a grid line.
///
/// Only `true` flags are serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapFlags {
    #[serde(default, skip_serializing_if = "is_false")]
    pub left: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub right: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub top: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bottom: bool,
}

impl SnapFlags {
    pub fn get(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    pub fn set(&mut self, side: Side) {
        match side {
            Side::Left => self.left = true,
            Side::Right => self.right = true,
            Side::Top => self.top = true,
            Side::Bottom => self.bottom = true,
        }
    }

    pub fn unset(&mut self, side: Side) {
        match side {
            Side::Left => self.left = false,
            Side::Right => self.right = false,
            Side::Top => self.top = false,
            Side::Bottom => self.bottom = false,
        }
    }

    /// Drop every alignment.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no side is aligned.
    pub fn is_empty(&self) -> bool {
        !(self.left || self.right || self.top || self.bottom)
    }
}

/// A wall, door, window or dimension: a thick segment between two world points (feet).
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Type and type-specific data.
    pub kind: ShapeKind,
    /// Start point (x1, y1).
    pub start: Point,
    /// End point (x2, y2).
    pub end: Point,
    /// Perpendicular width in feet.
    pub thickness: f64,
    /// Style string, e.g. `#d2cab0`.
    pub color: String,
    /// Grid alignment of each side.
    pub snap: SnapFlags,
}

impl Shape {
    /// Build a shape from a drag gesture.
    ///
    /// Returns `None` for a zero-length drag.
    pub fn new(shape_type: ShapeType, start: Point, end: Point, thickness: f64) -> Option<Self> {
        if distance_to_point(start, end) == 0.0 {
            log::debug!("Rejected zero-length {} at {:?}", shape_type, start);
            return None;
        }
        Some(Self {
            id: generate_id(),
            kind: shape_type.into(),
            start,
            end,
            thickness,
            color: shape_type.default_color().to_string(),
            snap: SnapFlags::default(),
        })
    }

    /// Build a shape from a type name and raw coordinates.
    ///
    /// Returns `None` if the type name is unknown or the segment has zero length.
    pub fn make(type_name: &str, x1: f64, y1: f64, x2: f64, y2: f64, thickness: f64) -> Option<Self> {
        let shape_type = match type_name.parse::<ShapeType>() {
            Ok(t) => t,
            Err(e) => {
                log::debug!("{}", e);
                return None;
            }
        };
        Self::new(shape_type, Point::new(x1, y1), Point::new(x2, y2), thickness)
    }

    /// Reconstruct a shape with a specific ID (for loading documents).
    pub(crate) fn reconstruct(
        id: ShapeId,
        kind: ShapeKind,
        start: Point,
        end: Point,
        thickness: f64,
        color: String,
        snap: SnapFlags,
    ) -> Self {
        Self {
            id,
            kind,
            start,
            end,
            thickness,
            color,
            snap,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    /// Door swing, or `None` for other types.
    pub fn swing(&self) -> Option<bool> {
        match self.kind {
            ShapeKind::Door { swing } => Some(swing),
            _ => None,
        }
    }

    /// Length in feet.
    pub fn length(&self) -> f64 {
        distance_to_point(self.end, self.start)
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Angle of start→end from the positive x axis, in radians.
    pub fn angle(&self) -> f64 {
        let d = self.end - self.start;
        d.y.atan2(d.x)
    }

    /// True when both endpoints coincide.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Translate both endpoints.
    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    /// The style string as a color, when it is a hex color.
    pub fn fill_color(&self) -> Option<Color> {
        parse_hex_color(&self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_wall() {
        let wall = Shape::make("wall", 0.0, 0.0, 3.0, 4.0, 0.5).unwrap();
        assert_eq!(wall.shape_type(), ShapeType::Wall);
        assert!((wall.length() - 5.0).abs() < f64::EPSILON);
        assert_eq!(wall.color, "#d2cab0");
        assert!(wall.snap.is_empty());
        assert_eq!(wall.swing(), None);
    }

    #[test]
    fn test_make_door_starts_unswung() {
        let door = Shape::make("door", 1.0, 1.0, 4.0, 1.0, 0.2).unwrap();
        assert_eq!(door.swing(), Some(false));
        assert_eq!(door.color, DOOR_COLOR);
    }

    #[test]
    fn test_make_rejects_zero_length() {
        assert!(Shape::make("wall", 0.0, 0.0, 0.0, 0.0, 0.5).is_none());
    }

    #[test]
    fn test_make_rejects_unknown_type() {
        assert!(Shape::make("sofa", 0.0, 0.0, 1.0, 1.0, 0.5).is_none());
    }

    #[test]
    fn test_id_format() {
        let shape = Shape::make("window", 0.0, 0.0, 1.0, 0.0, 0.3).unwrap();
        let id = shape.id();
        assert_eq!(id.len(), 8);
        assert!(id.starts_with('e'));
        assert!(id[1..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_ids_differ() {
        let a = Shape::make("wall", 0.0, 0.0, 1.0, 0.0, 0.5).unwrap();
        let b = Shape::make("wall", 0.0, 0.0, 1.0, 0.0, 0.5).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_shape_type_parse() {
        assert_eq!("dimension".parse::<ShapeType>(), Ok(ShapeType::Dimension));
        assert_eq!(
            "stair".parse::<ShapeType>(),
            Err(ParseError::ShapeType("stair".to_string()))
        );
        assert_eq!(ShapeType::Window.to_string(), "window");
    }

    #[test]
    fn test_snap_flags() {
        let mut flags = SnapFlags::default();
        assert!(flags.is_empty());
        flags.set(Side::Top);
        assert!(flags.get(Side::Top));
        assert!(!flags.get(Side::Left));
        flags.set(Side::Left);
        flags.unset(Side::Left);
        assert!(!flags.left && flags.top);
        assert_eq!(Side::Bottom.opposite(), Side::Top);
        flags.clear();
        assert!(flags.is_empty());
    }

    #[test]
    fn test_translate_and_angle() {
        let mut wall = Shape::make("wall", 0.0, 0.0, 0.0, 2.0, 0.5).unwrap();
        wall.translate(Vec2::new(1.0, -1.0));
        assert_eq!(wall.start, Point::new(1.0, -1.0));
        assert_eq!(wall.end, Point::new(1.0, 1.0));
        assert!((wall.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(wall.midpoint(), Point::new(1.0, 0.0));
    }

    #[test]
    fn test_fill_color() {
        let wall = Shape::make("wall", 0.0, 0.0, 1.0, 0.0, 0.5).unwrap();
        assert!(wall.fill_color().is_some());
    }
}

//! Directional grid snapping for walls, doors, windows and dimensions.
//!
//! A snap moves one side of a shape onto the nearest grid line. Which side counts as a
//! thickness face depends on the shape's orientation: a vertical wall shows its faces on the
//! left and right, a horizontal one on the top and bottom. Along the length there is no face,
//! so the shape just slides until its end sits on a line.

use crate::edit::{Anchor, Direction, make_horizontal, make_vertical};
use crate::shapes::{Shape, Side};
use serde::{Deserialize, Serialize};

/// Major grid spacing in feet.
pub const MAJOR_GRID_STEP: f64 = 5.0;
/// Minor grid spacing in feet.
pub const MINOR_GRID_STEP: f64 = 1.0;
/// Finest grid spacing in feet (3 inches).
pub const QUARTER_GRID_STEP: f64 = 0.25;

/// Grid level to snap against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridLevel {
    Major,
    #[default]
    Minor,
    Quarter,
}

impl GridLevel {
    /// Line spacing in feet.
    pub fn step(self) -> f64 {
        match self {
            GridLevel::Major => MAJOR_GRID_STEP,
            GridLevel::Minor => MINOR_GRID_STEP,
            GridLevel::Quarter => QUARTER_GRID_STEP,
        }
    }

    /// Map a host grid name. Anything but `major` is the minor grid; the quarter grid is only
    /// reachable as [`GridLevel::Quarter`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "major" => GridLevel::Major,
            _ => GridLevel::Minor,
        }
    }
}

impl From<&str> for GridLevel {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// Round a coordinate to the nearest line of the grid.
pub fn snap_value(v: f64, grid: GridLevel) -> f64 {
    let step = grid.step();
    (v / step).round() * step
}

/// How a shape lies on the plan, decided once per snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Taller than wide: thickness faces are on x.
    Vertical,
    /// Wider than tall: thickness faces are on y.
    Horizontal,
    /// Exactly 45°: left as drawn, faces treated like a horizontal shape.
    Diagonal,
}

impl Orientation {
    pub fn classify(shape: &Shape) -> Self {
        let dx = (shape.start.x - shape.end.x).abs();
        let dy = (shape.start.y - shape.end.y).abs();
        if dy > dx {
            Orientation::Vertical
        } else if dx > dy {
            Orientation::Horizontal
        } else {
            Orientation::Diagonal
        }
    }
}

fn set_x(shape: &mut Shape, x: f64) {
    shape.start.x = x;
    shape.end.x = x;
}

fn slide_x(shape: &mut Shape, dx: f64) {
    shape.start.x += dx;
    shape.end.x += dx;
}

fn slide_y(shape: &mut Shape, dy: f64) {
    shape.start.y += dy;
    shape.end.y += dy;
}

/// Snap one side of a shape to the grid and mark it aligned.
///
/// Near-axis shapes are first straightened about their center, which drops every flag. A snap
/// that moves the shape drops the flag of the opposite side. Returns the side that was aligned.
pub fn snap_shape(shape: &mut Shape, direction: Direction, grid: GridLevel) -> Side {
    let orientation = Orientation::classify(shape);
    let straightened = match orientation {
        Orientation::Vertical if shape.start.x != shape.end.x => {
            make_vertical(shape, Anchor::Center)
        }
        Orientation::Horizontal if shape.start.y != shape.end.y => {
            make_horizontal(shape, Anchor::Center)
        }
        _ => false,
    };
    if straightened {
        // Every face moved
        shape.snap.clear();
    }
    let before = shape.start;

    let vertical = orientation == Orientation::Vertical;
    let half = shape.thickness / 2.0;
    let x_min = shape.start.x.min(shape.end.x);
    let x_max = shape.start.x.max(shape.end.x);
    let y_min = shape.start.y.min(shape.end.y);
    let y_max = shape.start.y.max(shape.end.y);

    let side = match direction {
        Direction::Left => {
            if vertical {
                let line = snap_value(x_min - half, grid);
                set_x(shape, line + half);
            } else {
                slide_x(shape, snap_value(x_min, grid) - x_min);
            }
            Side::Left
        }
        Direction::Right => {
            if vertical {
                let line = snap_value(x_max + half, grid);
                set_x(shape, line - half);
            } else {
                slide_x(shape, snap_value(x_max, grid) - x_max);
            }
            Side::Right
        }
        Direction::Up => {
            if vertical {
                slide_y(shape, snap_value(y_min, grid) - y_min);
            } else {
                let line = snap_value(y_min - half, grid);
                slide_y(shape, (line - y_min) + half);
            }
            Side::Top
        }
        Direction::Down => {
            if vertical {
                slide_y(shape, snap_value(y_max, grid) - y_max);
            } else {
                let line = snap_value(y_max + half, grid);
                slide_y(shape, (line - y_max) - half);
            }
            Side::Bottom
        }
    };

    if shape.start != before {
        // The opposite face moved with this one
        shape.snap.unset(side.opposite());
    }
    shape.snap.set(side);
    log::debug!(
        "Snapped {} {:?} ({:?}, {:?} grid) to ({:.3}, {:.3})-({:.3}, {:.3})",
        shape.id(),
        side,
        orientation,
        grid,
        shape.start.x,
        shape.start.y,
        shape.end.x,
        shape.end.y
    );
    side
}

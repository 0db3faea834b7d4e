//! Per-type default colors and parsing of style strings.

use super::ShapeType;
use peniko::Color;

/// Fallback for dimensions and anything without a dedicated color.
pub const DEFAULT_COLOR: &str = "#ffffff";
pub const WALL_COLOR: &str = "#d2cab0";
pub const WINDOW_COLOR: &str = "#aeb0b0";
/// Doors carry an alpha channel so the swing area underneath stays visible.
pub const DOOR_COLOR: &str = "#c4a9a9a3";

/// Default style string for a type name. Unknown names get [`DEFAULT_COLOR`].
pub fn default_color_for_type(type_name: &str) -> &'static str {
    type_name
        .parse::<ShapeType>()
        .map(ShapeType::default_color)
        .unwrap_or(DEFAULT_COLOR)
}

/// Parse `#rrggbb` or `#rrggbbaa` into a color.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        6 => Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

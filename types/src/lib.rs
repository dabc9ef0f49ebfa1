//! Shared configuration types for crosshair
//!
//! This crate contains the serializable configuration types that are shared
//! between the geometry core, the overlay backend and the command-line glue.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Shape
// ─────────────────────────────────────────────────────────────────────────────

/// Crosshair shape kind.
///
/// The config file stores shapes by name; names that do not parse fall back
/// to [`Shape::Cross`] via [`Shape::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    #[default]
    Cross,
    Dot,
    Circle,
    CrossDot,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Cross, Shape::Dot, Shape::Circle, Shape::CrossDot];

    /// Config-file name of this shape
    pub fn name(self) -> &'static str {
        match self {
            Shape::Cross => "cross",
            Shape::Dot => "dot",
            Shape::Circle => "circle",
            Shape::CrossDot => "cross-dot",
        }
    }

    /// Lossy lookup: unknown names resolve to the default cross.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Whether the shape has arms, and therefore uses thickness and gap
    pub fn has_arms(self) -> bool {
        matches!(self, Shape::Cross | Shape::CrossDot)
    }
}

impl FromStr for Shape {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| UnknownShape(s.to_string()))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShape(pub String);

impl fmt::Display for UnknownShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown shape {:?}", self.0)
    }
}

impl std::error::Error for UnknownShape {}

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// 24-bit RGB color, stored as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x000000);
    pub const GREEN: Rgb = Rgb(0x00FF00);

    /// Pixel value for a 24-bit TrueColor visual
    pub fn pixel(self) -> u32 {
        self.0 & 0x00FF_FFFF
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    /// Accepts `#RRGGBB`, `0xRRGGBB` and bare `RRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex.len() != 6 {
            return Err(ColorParseError::Length(hex.to_string()));
        }
        // from_str_radix tolerates a leading '+'
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::NotHex(hex.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Rgb)
            .map_err(|_| ColorParseError::NotHex(hex.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.pixel())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Length(String),
    NotHex(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::Length(s) => write!(f, "color must be 6 hex digits (got {s:?})"),
            ColorParseError::NotHex(s) => write!(f, "invalid hex color {s:?}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

// ─────────────────────────────────────────────────────────────────────────────
// Config File Types
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_SHAPE: &str = "cross";
pub const DEFAULT_COLOR: &str = "#00FF00";
pub const DEFAULT_OUTLINE_COLOR: &str = "#000000";

/// Crosshair appearance, as written in the `[crosshair]` table.
///
/// Numbers stay signed here so that out-of-range values survive parsing and
/// can be reported by validation instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairSettings {
    pub shape: String,
    pub color: String,
    pub size: i32,
    pub thickness: i32,
    pub gap: i32,
    pub outline_thickness: i32,
    pub outline_color: String,
}

impl Default for CrosshairSettings {
    fn default() -> Self {
        Self {
            shape: DEFAULT_SHAPE.to_string(),
            color: DEFAULT_COLOR.to_string(),
            size: 10,
            thickness: 2,
            gap: 0,
            outline_thickness: 0,
            outline_color: DEFAULT_OUTLINE_COLOR.to_string(),
        }
    }
}

/// Placement, as written in the `[position]` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionSettings {
    /// Monitor index in left-to-right order, `-1` for the primary monitor
    pub monitor: i32,
    pub offset_x: i32,
    pub offset_y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crosshair: CrosshairSettings,
    pub position: PositionSettings,
}

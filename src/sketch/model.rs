use crate::sketch::error::SketchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Pen,
    Pencil,
    Highlighter,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Pen, Tool::Pencil, Tool::Highlighter, Tool::Eraser];

    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Pencil => "pencil",
            Tool::Highlighter => "highlighter",
            Tool::Eraser => "eraser",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = SketchError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized = name.trim().to_ascii_lowercase();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str() == normalized)
            .ok_or_else(|| SketchError::UnknownTool(name.to_string()))
    }
}

/// Pixel blending rule applied while a stroke is rasterised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeMode {
    /// Source-over.
    Normal,
    /// Multiply against the destination color, then source-over.
    Multiply,
    /// Destination-out: removes alpha, never paints a background color.
    Erase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Parses `#rgb` or `#rrggbb`. The result is always opaque.
    pub fn from_hex(value: &str) -> Result<Self, SketchError> {
        let invalid = || SketchError::InvalidColor(value.to_string());
        let digits = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, ch) in out.iter_mut().zip(digits.chars()) {
                    let nibble = ch.to_digit(16).ok_or_else(invalid)? as u8;
                    *slot = nibble * 17;
                }
                Ok(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Samples farther than this from the origin are treated like NaN: skipped,
/// never rasterised.
pub const MAX_SAMPLE_COORDINATE: f32 = 1_000_000.0;

/// A pointer position in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn is_drawable(self) -> bool {
        self.is_finite()
            && self.x.abs() <= MAX_SAMPLE_COORDINATE
            && self.y.abs() <= MAX_SAMPLE_COORDINATE
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self {
            x: x as f32,
            y: y as f32,
        }
    }
}

pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;

/// Base brush width chosen by the user, before any tool multiplier.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct StrokeWidth(f32);

impl Default for StrokeWidth {
    fn default() -> Self {
        Self(DEFAULT_STROKE_WIDTH)
    }
}

impl StrokeWidth {
    pub fn new(width: f32) -> Result<Self, SketchError> {
        if width.is_finite() && width > 0.0 {
            Ok(Self(width))
        } else {
            Err(SketchError::InvalidWidth(width))
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

/// The user's current brush selection. Resolved into a tool profile only when
/// a stroke begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub tool: Tool,
    pub color: Color,
    pub width: StrokeWidth,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: Color::BLACK,
            width: StrokeWidth::default(),
        }
    }
}

//! Tool table: turns the user's tool, width and color into the concrete
//! parameters a stroke is rasterised with.

use crate::sketch::error::SketchError;
use crate::sketch::model::{Color, CompositeMode, StrokeStyle, StrokeWidth, Tool};

pub const PENCIL_OPACITY: f32 = 0.7;
pub const PENCIL_WIDTH_MULTIPLIER: f32 = 0.8;
pub const HIGHLIGHTER_OPACITY: f32 = 0.3;
pub const HIGHLIGHTER_WIDTH_MULTIPLIER: f32 = 4.0;
pub const ERASER_WIDTH_MULTIPLIER: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolProfile {
    pub tool: Tool,
    pub color: Color,
    pub composite_mode: CompositeMode,
    pub opacity: f32,
    pub effective_width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ToolPolicy {
    composite_mode: CompositeMode,
    opacity: f32,
    width_multiplier: f32,
}

fn policy(tool: Tool) -> ToolPolicy {
    match tool {
        Tool::Pen => ToolPolicy {
            composite_mode: CompositeMode::Normal,
            opacity: 1.0,
            width_multiplier: 1.0,
        },
        Tool::Pencil => ToolPolicy {
            composite_mode: CompositeMode::Normal,
            opacity: PENCIL_OPACITY,
            width_multiplier: PENCIL_WIDTH_MULTIPLIER,
        },
        Tool::Highlighter => ToolPolicy {
            composite_mode: CompositeMode::Multiply,
            opacity: HIGHLIGHTER_OPACITY,
            width_multiplier: HIGHLIGHTER_WIDTH_MULTIPLIER,
        },
        Tool::Eraser => ToolPolicy {
            composite_mode: CompositeMode::Erase,
            opacity: 1.0,
            width_multiplier: ERASER_WIDTH_MULTIPLIER,
        },
    }
}

pub fn resolve_tool(tool: Tool, base_width: StrokeWidth, color: Color) -> ToolProfile {
    let policy = policy(tool);
    ToolProfile {
        tool,
        color,
        composite_mode: policy.composite_mode,
        opacity: policy.opacity,
        effective_width: base_width.get() * policy.width_multiplier,
    }
}

pub fn resolve_style(style: StrokeStyle) -> ToolProfile {
    resolve_tool(style.tool, style.width, style.color)
}

/// Resolves a tool by name. Unknown names are an error; there is no fallback
/// tool.
pub fn resolve(tool: &str, base_width: f32, color: Color) -> Result<ToolProfile, SketchError> {
    let tool: Tool = tool.parse()?;
    let width = StrokeWidth::new(base_width)?;
    Ok(resolve_tool(tool, width, color))
}

use crate::sketch::history::DEFAULT_HISTORY_DEPTH;
use crate::sketch::model::{Color, StrokeWidth, Tool, DEFAULT_STROKE_WIDTH};
use crate::sketch::persist::DEFAULT_PERSIST_DEBOUNCE;
use crate::sketch::surface::DEFAULT_MAX_DIMENSION;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SketchSettings {
    #[serde(default = "default_tool")]
    pub default_tool: Tool,
    #[serde(default = "default_color")]
    pub default_color: Color,
    #[serde(default = "default_width")]
    pub default_width: f32,
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
    #[serde(default = "default_persist_debounce_ms")]
    pub persist_debounce_ms: u64,
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
}

fn default_tool() -> Tool {
    Tool::Pen
}

fn default_color() -> Color {
    Color::BLACK
}

fn default_width() -> f32 {
    DEFAULT_STROKE_WIDTH
}

fn default_history_depth() -> usize {
    DEFAULT_HISTORY_DEPTH
}

fn default_persist_debounce_ms() -> u64 {
    DEFAULT_PERSIST_DEBOUNCE.as_millis() as u64
}

fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}

impl Default for SketchSettings {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
            default_color: default_color(),
            default_width: default_width(),
            history_depth: default_history_depth(),
            persist_debounce_ms: default_persist_debounce_ms(),
            max_dimension: default_max_dimension(),
        }
    }
}

impl SketchSettings {
    /// Repairs values a hand-edited settings file may carry. Returns whether
    /// anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;

        if StrokeWidth::new(self.default_width).is_err() {
            self.default_width = default_width();
            changed = true;
        }
        if self.history_depth == 0 {
            self.history_depth = 1;
            changed = true;
        }
        if self.max_dimension == 0 {
            self.max_dimension = 1;
            changed = true;
        }
        if self.max_dimension > DEFAULT_MAX_DIMENSION {
            self.max_dimension = DEFAULT_MAX_DIMENSION;
            changed = true;
        }
        // Ink colors are opaque; tool opacity is applied separately.
        if self.default_color.a != 255 {
            self.default_color.a = 255;
            changed = true;
        }

        changed
    }

    pub fn persist_debounce(&self) -> Duration {
        Duration::from_millis(self.persist_debounce_ms)
    }

    pub fn stroke_width(&self) -> StrokeWidth {
        StrokeWidth::new(self.default_width).unwrap_or_default()
    }
}

use crate::sketch::state::StrokeState;
use std::fmt;

/// Every failure the sketch engine reports. All of them are recoverable and
/// leave the engine exactly as it was before the failing call.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchError {
    InvalidDimension { width: i64, height: i64 },
    UnknownTool(String),
    InvalidWidth(f32),
    InvalidColor(String),
    NothingToUndo,
    NothingToRedo,
    InvalidState {
        operation: &'static str,
        state: StrokeState,
    },
    MalformedBlob(String),
    EncodeFailed(String),
}

impl SketchError {
    /// Benign outcomes that only mean "nothing happened".
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::NothingToUndo | Self::NothingToRedo)
    }
}

impl fmt::Display for SketchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { width, height } => {
                write!(f, "invalid surface dimensions {width}x{height}")
            }
            Self::UnknownTool(name) => write!(f, "unknown tool `{name}`"),
            Self::InvalidWidth(width) => write!(f, "stroke width must be positive, got {width}"),
            Self::InvalidColor(value) => write!(f, "invalid color `{value}`"),
            Self::NothingToUndo => f.write_str("nothing to undo"),
            Self::NothingToRedo => f.write_str("nothing to redo"),
            Self::InvalidState { operation, state } => {
                write!(f, "cannot {operation} while {}", state.as_str())
            }
            Self::MalformedBlob(reason) => write!(f, "malformed surface blob: {reason}"),
            Self::EncodeFailed(reason) => write!(f, "failed to encode surface: {reason}"),
        }
    }
}

impl std::error::Error for SketchError {}

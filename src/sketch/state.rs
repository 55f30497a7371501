#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeState {
    Idle,
    Stroking,
}

impl StrokeState {
    pub fn is_stroking(self) -> bool {
        matches!(self, Self::Stroking)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Stroking => "stroking",
        }
    }
}

pub fn can_transition(from: StrokeState, to: StrokeState) -> bool {
    matches!(
        (from, to),
        (StrokeState::Idle, StrokeState::Stroking) | (StrokeState::Stroking, StrokeState::Idle)
    )
}

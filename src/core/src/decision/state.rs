use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Diagnostic label of the branch the engine took on its last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DecisionState {
    #[default]
    Positioning,
    SearchBall,
    ApproachBall,
    TakeShot,
    DefendGoal,
    KickoffAggressive,
    /// Referee has stopped play.
    Idle,
    /// The learned policy chose the action.
    Learned,
}

impl Display for DecisionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionState::Positioning => write!(f, "Positioning"),
            DecisionState::SearchBall => write!(f, "SearchBall"),
            DecisionState::ApproachBall => write!(f, "ApproachBall"),
            DecisionState::TakeShot => write!(f, "TakeShot"),
            DecisionState::DefendGoal => write!(f, "DefendGoal"),
            DecisionState::KickoffAggressive => write!(f, "KickoffAggressive"),
            DecisionState::Idle => write!(f, "Idle"),
            DecisionState::Learned => write!(f, "Learned"),
        }
    }
}

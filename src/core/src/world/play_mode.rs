use crate::world::PlayerSide;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Referee-announced phase of the match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlayMode {
    #[default]
    BeforeKickOff,
    KickOff(PlayerSide),
    PlayOn,
    Goal(PlayerSide),
    TimeOver,
    /// Any other referee message (free kicks, corners, offsides...). Play continues.
    Other(String),
}

impl PlayMode {
    /// Parsing never fails: unrecognised modes are kept verbatim as `Other`.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        let lower = value.to_ascii_lowercase();

        match lower.as_str() {
            "before_kick_off" => return PlayMode::BeforeKickOff,
            "play_on" => return PlayMode::PlayOn,
            "time_over" => return PlayMode::TimeOver,
            _ => {}
        }

        if let Some(side) = lower.strip_prefix("kick_off_").and_then(PlayerSide::parse) {
            return PlayMode::KickOff(side);
        }

        // goal_l, goal_r and the scored variants goal_l_1, goal_r_2...
        if let Some(rest) = lower.strip_prefix("goal_") {
            let side_tag = rest.split('_').next().unwrap_or_default();
            if let Some(side) = PlayerSide::parse(side_tag) {
                return PlayMode::Goal(side);
            }
        }

        PlayMode::Other(value.to_string())
    }

    /// Dead-ball phases during which the agent must stay still.
    pub fn is_dead_ball(&self) -> bool {
        matches!(
            self,
            PlayMode::BeforeKickOff | PlayMode::Goal(_) | PlayMode::TimeOver
        )
    }

    pub fn is_kick_off_for(&self, side: PlayerSide) -> bool {
        matches!(self, PlayMode::KickOff(kick_off_side) if *kick_off_side == side)
    }

    /// Phases after which players walk back to their formation positions.
    pub fn requires_reposition(&self) -> bool {
        matches!(self, PlayMode::BeforeKickOff | PlayMode::Goal(_))
    }
}

impl Display for PlayMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayMode::BeforeKickOff => write!(f, "before_kick_off"),
            PlayMode::KickOff(side) => write!(f, "kick_off_{}", side),
            PlayMode::PlayOn => write!(f, "play_on"),
            PlayMode::Goal(side) => write!(f, "goal_{}", side),
            PlayMode::TimeOver => write!(f, "time_over"),
            PlayMode::Other(mode) => write!(f, "{}", mode),
        }
    }
}

impl Serialize for PlayMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

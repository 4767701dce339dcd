use crate::utils::normalize_angle;
use serde::Serialize;

pub const MAX_POWER: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kick {
    pub power: f32,
    /// Degrees relative to the body direction.
    pub direction: f32,
}

impl Kick {
    pub fn new(power: f32, direction: f32) -> Self {
        Kick { power, direction }
    }

    fn sanitized(self) -> Option<Self> {
        if !self.power.is_finite() || !self.direction.is_finite() {
            return None;
        }

        Some(Kick {
            power: self.power.clamp(0.0, MAX_POWER),
            direction: normalize_angle(self.direction),
        })
    }
}

/// What the agent wants to do this tick. Commands are issued turn, dash, kick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActionIntent {
    /// Degrees relative to the current heading.
    pub turn: f32,
    pub dash: f32,
    pub kick: Option<Kick>,
}

impl Default for ActionIntent {
    fn default() -> Self {
        Self::idle()
    }
}

impl ActionIntent {
    /// Stationary turn of zero: does nothing.
    pub fn idle() -> Self {
        ActionIntent {
            turn: 0.0,
            dash: 0.0,
            kick: None,
        }
    }

    pub fn turn_only(turn: f32) -> Self {
        ActionIntent {
            turn,
            dash: 0.0,
            kick: None,
        }
    }

    pub fn steer(turn: f32, dash: f32) -> Self {
        ActionIntent {
            turn,
            dash,
            kick: None,
        }
    }

    pub fn kick(kick: Kick) -> Self {
        ActionIntent {
            turn: 0.0,
            dash: 0.0,
            kick: Some(kick),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.turn.is_finite()
            && self.dash.is_finite()
            && self
                .kick
                .is_none_or(|kick| kick.power.is_finite() && kick.direction.is_finite())
    }

    /// Clamps every field into its legal range. Any non-finite field turns
    /// the whole intent into [`ActionIntent::idle`].
    pub fn sanitized(self) -> Self {
        if !self.is_finite() {
            return Self::idle();
        }

        ActionIntent {
            turn: normalize_angle(self.turn),
            dash: self.dash.clamp(0.0, MAX_POWER),
            kick: self.kick.and_then(Kick::sanitized),
        }
    }
}

mod passing;
mod shooting;

use crate::world::PlayerSighting;

/// Shooting and passing constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TacticsConfig {
    /// Goals farther than this are out of shooting range.
    pub shot_cutoff: f32,
    pub shot_tolerance: f32,
    pub shot_power: f32,

    pub pass_min_distance: f32,
    pub pass_max_distance: f32,
    pub pass_tolerance: f32,
    /// Teammates within this cone around the body direction count as "forward".
    pub pass_forward_cone: f32,
    pub pass_forward_bonus: f32,
    pub pass_distance_weight: f32,
    pub pass_base_power: f32,
    pub pass_power_per_unit: f32,
    pub pass_blocked_penalty: f32,
}

impl Default for TacticsConfig {
    fn default() -> Self {
        TacticsConfig {
            shot_cutoff: 45.0,
            shot_tolerance: 6.0,
            shot_power: 100.0,
            pass_min_distance: 2.0,
            pass_max_distance: 45.0,
            pass_tolerance: 5.0,
            pass_forward_cone: 45.0,
            pass_forward_bonus: 20.0,
            pass_distance_weight: 0.5,
            pass_base_power: 40.0,
            pass_power_per_unit: 2.0,
            pass_blocked_penalty: 500.0,
        }
    }
}

/// Pure shot and pass selection over a world model snapshot.
#[derive(Debug, Clone, Default)]
pub struct TacticsEvaluator {
    config: TacticsConfig,
}

impl TacticsEvaluator {
    pub fn new(config: TacticsConfig) -> Self {
        TacticsEvaluator { config }
    }

    pub fn config(&self) -> &TacticsConfig {
        &self.config
    }
}

/// True when some opponent stands nearer than `dist` inside `tolerance`
/// degrees of `dir`.
pub(crate) fn lane_blocked(opponents: &[PlayerSighting], dist: f32, dir: f32, tolerance: f32) -> bool {
    opponents
        .iter()
        .any(|opponent| opponent.dist < dist && crate::utils::angle_difference(opponent.dir, dir) < tolerance)
}

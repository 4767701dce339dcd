use crate::roles::RoleProfile;
use crate::utils::direction_of;
use nalgebra::Vector2;

/// Tunables of the potential field. Defaults are the tuned match values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldForceConfig {
    /// Targets farther than this exert no pull.
    pub sensing_range: f32,
    /// Targets closer than this exert no pull (already there).
    pub target_deadzone: f32,

    pub opponent_danger_radius: f32,
    pub opponent_repulsion: f32,
    pub opponent_repulsion_max: f32,

    pub teammate_radius: f32,
    pub teammate_repulsion: f32,
    pub teammate_repulsion_max: f32,

    /// Lower bound on distances used in inverse-square terms.
    pub distance_floor: f32,
    /// Goal bias only applies when the goal is farther than this.
    pub goal_deadzone: f32,

    /// Resultants weaker than this mean "arrived".
    pub arrival_threshold: f32,
    pub power_scale: f32,
    pub max_power: f32,
}

impl Default for FieldForceConfig {
    fn default() -> Self {
        FieldForceConfig {
            sensing_range: 60.0,
            target_deadzone: 0.5,
            opponent_danger_radius: 6.0,
            opponent_repulsion: 400.0,
            opponent_repulsion_max: 150.0,
            teammate_radius: 3.0,
            teammate_repulsion: 60.0,
            teammate_repulsion_max: 40.0,
            distance_floor: 0.3,
            goal_deadzone: 1.0,
            arrival_threshold: 0.5,
            power_scale: 0.8,
            max_power: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    /// Self-relative heading in degrees, 0 straight ahead.
    pub angle: f32,
    /// Dash power in [0, 100].
    pub power: f32,
}

impl Steering {
    pub fn settled() -> Self {
        Steering {
            angle: 0.0,
            power: 0.0,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.power == 0.0
    }
}

/// Sums target attraction, opponent and teammate repulsion and the attacking
/// goal bias into one heading and dash power. All positions are self-relative.
#[derive(Debug, Clone, Default)]
pub struct PotentialField {
    config: FieldForceConfig,
}

impl PotentialField {
    pub fn new(config: FieldForceConfig) -> Self {
        PotentialField { config }
    }

    pub fn config(&self) -> &FieldForceConfig {
        &self.config
    }

    pub fn compute_steering(
        &self,
        target: &Vector2<f32>,
        opponents: &[Vector2<f32>],
        teammates: &[Vector2<f32>],
        profile: &RoleProfile,
        goal: Option<Vector2<f32>>,
    ) -> Steering {
        let force = self.resultant(target, opponents, teammates, profile, goal);
        let magnitude = force.norm();

        if !magnitude.is_finite() || magnitude < self.config.arrival_threshold {
            return Steering::settled();
        }

        Steering {
            angle: direction_of(&force),
            power: (magnitude * self.config.power_scale).min(self.config.max_power),
        }
    }

    pub fn resultant(
        &self,
        target: &Vector2<f32>,
        opponents: &[Vector2<f32>],
        teammates: &[Vector2<f32>],
        profile: &RoleProfile,
        goal: Option<Vector2<f32>>,
    ) -> Vector2<f32> {
        let config = &self.config;
        let mut force = Vector2::zeros();

        let target_distance = target.norm();
        let target_in_range = target_distance <= config.sensing_range;

        if target_in_range && target_distance > config.target_deadzone {
            force += (*target / target_distance) * profile.attraction;
        }

        for opponent in opponents {
            force += Self::repulsion(
                opponent,
                config.opponent_danger_radius,
                config.opponent_repulsion,
                config.opponent_repulsion_max,
                config.distance_floor,
            );
        }

        for teammate in teammates {
            force += Self::repulsion(
                teammate,
                config.teammate_radius,
                config.teammate_repulsion,
                config.teammate_repulsion_max,
                config.distance_floor,
            );
        }

        if profile.goal_bias > 0.0 && target_in_range {
            if let Some(goal) = goal {
                let goal_distance = goal.norm();
                if goal_distance > config.goal_deadzone {
                    force += (goal / goal_distance) * profile.goal_bias;
                }
            }
        }

        force
    }

    fn repulsion(
        obstacle: &Vector2<f32>,
        radius: f32,
        strength: f32,
        max_magnitude: f32,
        floor: f32,
    ) -> Vector2<f32> {
        let distance = obstacle.norm();
        if !distance.is_finite() || distance >= radius {
            return Vector2::zeros();
        }

        // Sitting right on top of it: back off straight behind.
        let away = if distance > f32::EPSILON {
            -*obstacle / distance
        } else {
            Vector2::new(-1.0, 0.0)
        };

        let clamped = distance.max(floor);
        let magnitude = (strength / (clamped * clamped)).min(max_magnitude);

        away * magnitude
    }
}

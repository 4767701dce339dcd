use crate::planning::{DEFAULT_CELL_SIZE, FieldForceConfig, WAYPOINT_REACHED_THRESHOLD};
use crate::tactics::TacticsConfig;

/// Every tunable of the decision engine. `Default` gives the match values.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Ball closer than this is under the agent's control.
    pub possession_distance: f32,

    pub goalie_scan_angle: f32,
    pub goalie_clear_distance: f32,
    pub goalie_clear_power: f32,
    /// Goalie leaves its line for balls closer than this.
    pub goalie_alert_distance: f32,
    pub goalie_alert_dash: f32,

    pub scan_angle: f32,
    pub dribble_power: f32,
    /// Dash ceiling once the ball is within the role's approach distance.
    pub approach_dash_limit: f32,

    pub kickoff_power: f32,
    pub kickoff_direction: f32,

    /// Opponents nearer than this count towards an obstruction.
    pub obstruction_radius: f32,
    pub obstruction_count: usize,
    pub waypoint_reached: f32,
    /// Dash per unit of waypoint distance.
    pub waypoint_dash_gain: f32,
    pub planner_cell_size: f32,

    pub forces: FieldForceConfig,
    pub tactics: TacticsConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            possession_distance: 0.7,
            goalie_scan_angle: 30.0,
            goalie_clear_distance: 2.0,
            goalie_clear_power: 100.0,
            goalie_alert_distance: 15.0,
            goalie_alert_dash: 100.0,
            scan_angle: 60.0,
            dribble_power: 20.0,
            approach_dash_limit: 60.0,
            kickoff_power: 100.0,
            kickoff_direction: 45.0,
            obstruction_radius: 5.0,
            obstruction_count: 2,
            waypoint_reached: WAYPOINT_REACHED_THRESHOLD,
            waypoint_dash_gain: 20.0,
            planner_cell_size: DEFAULT_CELL_SIZE,
            forces: FieldForceConfig::default(),
            tactics: TacticsConfig::default(),
        }
    }
}

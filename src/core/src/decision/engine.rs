use crate::decision::{ActionIntent, DecisionState, EngineConfig, Kick, MAX_POWER};
use crate::planning::{GridPlanner, PotentialField, Steering, WaypointPath};
use crate::roles::{Role, RoleManager, RoleProfile};
use crate::tactics::TacticsEvaluator;
use crate::utils::{direction_of, normalize_angle};
use crate::world::{BallSighting, WorldModel};
use log::debug;
use nalgebra::Vector2;

/// Role-aware per-tick decision state machine.
///
/// Every tick is decided from the current world model alone; the only state
/// carried between ticks is the diagnostic label and the detour path built
/// while opponents crowd the agent.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    role: Role,
    profile: RoleProfile,
    config: EngineConfig,

    field: PotentialField,
    planner: GridPlanner,
    tactics: TacticsEvaluator,

    state: DecisionState,
    path: Option<WaypointPath>,
}

impl DecisionEngine {
    pub fn new(role: Role, config: EngineConfig) -> Self {
        DecisionEngine {
            role,
            profile: RoleProfile::for_role(role),
            field: PotentialField::new(config.forces),
            planner: GridPlanner::new(config.planner_cell_size),
            tactics: TacticsEvaluator::new(config.tactics),
            config,
            state: DecisionState::default(),
            path: None,
        }
    }

    pub fn for_player(unum: u8, roles: &dyn RoleManager, config: EngineConfig) -> Self {
        Self::new(roles.role(unum), config)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn profile(&self) -> &RoleProfile {
        &self.profile
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> DecisionState {
        self.state
    }

    pub fn path(&self) -> Option<&WaypointPath> {
        self.path.as_ref()
    }

    pub fn step(&mut self, world: &WorldModel) -> ActionIntent {
        let previous = self.state;
        let intent = self.decide(world).sanitized();

        if previous != self.state {
            debug!(
                "player {} ({}) t={}: {} -> {}",
                world.unum, self.role, world.time, previous, self.state
            );
        }
        debug!("player {} t={}: {:?}", world.unum, world.time, intent);

        intent
    }

    fn decide(&mut self, world: &WorldModel) -> ActionIntent {
        if world.play_mode.is_dead_ball() {
            self.path = None;
            self.state = DecisionState::Idle;
            return ActionIntent::idle();
        }

        let at_ball = world
            .ball
            .is_some_and(|ball| ball.dist < self.config.possession_distance);

        if world.is_own_kick_off() && at_ball {
            return self.kick_off(world);
        }

        if self.role.is_goalie() {
            self.goalie(world)
        } else {
            self.field_player(world)
        }
    }

    fn kick_off(&mut self, world: &WorldModel) -> ActionIntent {
        self.path = None;
        self.state = DecisionState::KickoffAggressive;

        let kick = self.tactics.evaluate_pass(world, world.unum).unwrap_or(Kick::new(
            self.config.kickoff_power,
            self.config.kickoff_direction,
        ));

        ActionIntent::kick(kick)
    }

    fn goalie(&mut self, world: &WorldModel) -> ActionIntent {
        let Some(ball) = world.ball else {
            self.path = None;
            self.state = DecisionState::SearchBall;
            return ActionIntent::turn_only(self.config.goalie_scan_angle);
        };

        if ball.dist < self.config.goalie_clear_distance {
            self.path = None;
            self.state = DecisionState::TakeShot;
            return ActionIntent::kick(Kick::new(self.config.goalie_clear_power, 0.0));
        }

        self.state = DecisionState::DefendGoal;

        if ball.dist < self.config.goalie_alert_distance {
            if let Some(detour) = self.detour(world, &ball) {
                return detour;
            }

            let steering = self.steering(world, &ball);
            let turn = if steering.is_settled() { ball.dir } else { steering.angle };
            return ActionIntent::steer(turn, self.config.goalie_alert_dash);
        }

        self.path = None;
        ActionIntent::turn_only(ball.dir)
    }

    fn field_player(&mut self, world: &WorldModel) -> ActionIntent {
        let Some(ball) = world.ball else {
            self.path = None;
            self.state = DecisionState::SearchBall;
            return ActionIntent::turn_only(self.config.scan_angle);
        };

        if ball.dist < self.config.possession_distance {
            self.path = None;
            self.state = DecisionState::TakeShot;
            return ActionIntent::kick(self.on_ball(world));
        }

        if ball.dist < self.profile.chase_distance {
            self.state = DecisionState::ApproachBall;
            return self.approach(world, &ball);
        }

        self.path = None;
        self.state = DecisionState::Positioning;
        ActionIntent::turn_only(ball.dir)
    }

    /// Shot within the role's range, else the best pass, else a dribble.
    fn on_ball(&self, world: &WorldModel) -> Kick {
        self.tactics
            .evaluate_shot_within(world, world.side, self.profile.shoot_distance)
            .or_else(|| self.tactics.evaluate_pass(world, world.unum))
            .unwrap_or(Kick::new(self.config.dribble_power, 0.0))
    }

    fn approach(&mut self, world: &WorldModel, ball: &BallSighting) -> ActionIntent {
        if let Some(detour) = self.detour(world, ball) {
            return detour;
        }

        let steering = self.steering(world, ball);
        if steering.is_settled() {
            return ActionIntent::turn_only(ball.dir);
        }

        let mut dash = steering.power;
        if ball.dist < self.profile.approach_distance {
            dash = dash.min(self.config.approach_dash_limit);
        }

        ActionIntent::steer(steering.angle, dash)
    }

    fn steering(&self, world: &WorldModel, ball: &BallSighting) -> Steering {
        let opponents: Vec<Vector2<f32>> = world.opponents.iter().map(|p| p.position()).collect();
        let teammates: Vec<Vector2<f32>> = world.teammates.iter().map(|p| p.position()).collect();
        let goal = world.opponent_goal().map(|goal| goal.position());

        self.field
            .compute_steering(&ball.position(), &opponents, &teammates, &self.profile, goal)
    }

    /// Waypoint steering around a crowd of opponents.
    ///
    /// Returns `None` when there is no obstruction, no route, or the route is
    /// used up; the caller then falls back to the potential field.
    fn detour(&mut self, world: &WorldModel, ball: &BallSighting) -> Option<ActionIntent> {
        let crowd = world.opponents_within(self.config.obstruction_radius).count();
        if crowd < self.config.obstruction_count {
            self.path = None;
            return None;
        }

        // Without an absolute pose the frame moves with the agent, so a stored
        // route goes stale after one tick.
        if world.self_pose.is_none() {
            self.path = None;
        }

        let pose = world.self_pose_or_origin();
        let position = pose.position();

        if self.path.is_none() {
            let goal = pose.to_frame(&ball.position());
            let obstacles: Vec<Vector2<f32>> = world
                .opponents
                .iter()
                .map(|opponent| pose.to_frame(&opponent.position()))
                .collect();

            self.path = self.planner.plan(&position, &goal, &obstacles).map(WaypointPath::new);

            match &self.path {
                Some(path) => debug!(
                    "player {}: {} opponents close, detour of {} waypoints",
                    world.unum,
                    crowd,
                    path.len()
                ),
                None => debug!("player {}: no detour found", world.unum),
            }
        }

        let waypoint = self.path.as_mut()?.update(&position, self.config.waypoint_reached)?;

        let offset = waypoint - position;
        let turn = normalize_angle(direction_of(&offset) - pose.body);
        let dash = (offset.norm() * self.config.waypoint_dash_gain).min(MAX_POWER);

        Some(ActionIntent::steer(turn, dash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Observation, PlayMode, PlayerSide, Pose};
    use proptest::prelude::*;

    fn engine(role: Role) -> DecisionEngine {
        DecisionEngine::new(role, EngineConfig::default())
    }

    fn world(role: Role, unum: u8, mode: PlayMode, observation: Observation) -> WorldModel {
        let mut world = WorldModel::new(PlayerSide::Left, unum, role);
        world.update_play_mode(mode);
        world.update_from_observation(&observation);
        world
    }

    fn play_on(role: Role, observation: Observation) -> WorldModel {
        world(role, 5, PlayMode::PlayOn, observation)
    }

    #[test]
    fn test_before_kick_off_is_idle() {
        let mut engine = engine(Role::Forward);
        let world = world(
            Role::Forward,
            9,
            PlayMode::BeforeKickOff,
            Observation::at(0)
                .with_ball(0.3, 0.0)
                .with_player(PlayerSide::Right, Some(4), 1.0, 0.0)
                .with_player(PlayerSide::Right, Some(5), 2.0, 10.0),
        );

        assert_eq!(engine.step(&world), ActionIntent::idle());
        assert_eq!(engine.state(), DecisionState::Idle);
    }

    #[test]
    fn test_goal_and_time_over_are_idle() {
        for mode in [
            PlayMode::Goal(PlayerSide::Left),
            PlayMode::Goal(PlayerSide::Right),
            PlayMode::TimeOver,
        ] {
            let mut engine = engine(Role::Goalie);
            let world = world(Role::Goalie, 1, mode, Observation::at(100).with_ball(1.0, 0.0));
            assert_eq!(engine.step(&world), ActionIntent::idle());
        }
    }

    #[test]
    fn test_other_play_modes_continue_play() {
        let mut engine = engine(Role::Midfielder);
        let world = world(
            Role::Midfielder,
            6,
            PlayMode::Other("free_kick_l".to_string()),
            Observation::at(40),
        );

        assert_eq!(engine.step(&world), ActionIntent::turn_only(60.0));
    }

    #[test]
    fn test_own_kick_off_without_teammates_kicks_wide() {
        let mut engine = engine(Role::CenterForward);
        let world = world(
            Role::CenterForward,
            10,
            PlayMode::KickOff(PlayerSide::Left),
            Observation::at(0).with_ball(0.4, 0.0),
        );

        assert_eq!(engine.step(&world), ActionIntent::kick(Kick::new(100.0, 45.0)));
        assert_eq!(engine.state(), DecisionState::KickoffAggressive);
    }

    #[test]
    fn test_own_kick_off_prefers_pass() {
        let mut engine = engine(Role::CenterForward);
        let world = world(
            Role::CenterForward,
            10,
            PlayMode::KickOff(PlayerSide::Left),
            Observation::at(0)
                .with_ball(0.4, 0.0)
                .with_player(PlayerSide::Left, Some(8), 10.0, -100.0),
        );

        assert_eq!(engine.step(&world), ActionIntent::kick(Kick::new(60.0, -100.0)));
    }

    #[test]
    fn test_opponent_kick_off_plays_normally() {
        let mut engine = engine(Role::Midfielder);
        let world = world(
            Role::Midfielder,
            6,
            PlayMode::KickOff(PlayerSide::Right),
            Observation::at(0),
        );

        assert_eq!(engine.step(&world), ActionIntent::turn_only(60.0));
    }

    #[test]
    fn test_goalie_clears_close_ball() {
        let mut engine = engine(Role::Goalie);
        let intent = engine.step(&play_on(Role::Goalie, Observation::at(10).with_ball(1.0, 30.0)));

        let kick = intent.kick.expect("goalie should clear");
        assert_eq!(kick.power, 100.0);
        assert_eq!(engine.state(), DecisionState::TakeShot);
    }

    #[test]
    fn test_goalie_scans_without_ball() {
        let mut engine = engine(Role::Goalie);
        let intent = engine.step(&play_on(Role::Goalie, Observation::at(10)));

        assert_eq!(intent, ActionIntent::turn_only(30.0));
        assert_eq!(engine.state(), DecisionState::SearchBall);
    }

    #[test]
    fn test_goalie_rushes_alert_ball() {
        let mut engine = engine(Role::Goalie);
        let intent = engine.step(&play_on(Role::Goalie, Observation::at(10).with_ball(10.0, 0.0)));

        assert_eq!(intent.dash, 100.0);
        assert!(intent.turn.abs() < 1e-3);
        assert!(intent.kick.is_none());
        assert_eq!(engine.state(), DecisionState::DefendGoal);
    }

    #[test]
    fn test_goalie_tracks_distant_ball() {
        let mut engine = engine(Role::Goalie);
        let intent = engine.step(&play_on(Role::Goalie, Observation::at(10).with_ball(30.0, 20.0)));

        assert_eq!(intent, ActionIntent::turn_only(20.0));
    }

    #[test]
    fn test_field_player_scans_without_ball() {
        let mut engine = engine(Role::Midfielder);
        let intent = engine.step(&play_on(Role::Midfielder, Observation::at(3)));

        assert_eq!(intent.turn, 60.0);
        assert_eq!(intent.dash, 0.0);
        assert!(intent.kick.is_none());
    }

    #[test]
    fn test_forward_shoots_at_open_goal() {
        let mut engine = engine(Role::Forward);
        let intent = engine.step(&play_on(
            Role::Forward,
            Observation::at(3)
                .with_ball(0.5, 0.0)
                .with_goal(PlayerSide::Right, 20.0, 10.0),
        ));

        assert_eq!(intent, ActionIntent::kick(Kick::new(100.0, 10.0)));
    }

    #[test]
    fn test_defender_passes_when_goal_out_of_role_range() {
        let mut engine = engine(Role::CenterBack);
        let intent = engine.step(&play_on(
            Role::CenterBack,
            Observation::at(3)
                .with_ball(0.5, 0.0)
                .with_goal(PlayerSide::Right, 30.0, 0.0)
                .with_player(PlayerSide::Left, Some(8), 10.0, 20.0),
        ));

        assert_eq!(intent, ActionIntent::kick(Kick::new(60.0, 20.0)));
    }

    #[test]
    fn test_dribbles_when_nothing_better() {
        let mut engine = engine(Role::Midfielder);
        let intent = engine.step(&play_on(Role::Midfielder, Observation::at(3).with_ball(0.5, 0.0)));

        assert_eq!(intent, ActionIntent::kick(Kick::new(20.0, 0.0)));
    }

    #[test]
    fn test_chases_ball_within_role_range() {
        let mut engine = engine(Role::Midfielder);
        let intent = engine.step(&play_on(Role::Midfielder, Observation::at(3).with_ball(20.0, 0.0)));

        assert!(intent.turn.abs() < 1e-3);
        assert!(intent.dash > 0.0);
        assert_eq!(engine.state(), DecisionState::ApproachBall);
    }

    #[test]
    fn test_holds_position_beyond_role_range() {
        let mut engine = engine(Role::CenterBack);
        let intent = engine.step(&play_on(Role::CenterBack, Observation::at(3).with_ball(25.0, -40.0)));

        assert_eq!(intent, ActionIntent::turn_only(-40.0));
        assert_eq!(engine.state(), DecisionState::Positioning);
    }

    #[test]
    fn test_slows_down_near_ball() {
        let mut engine = engine(Role::Forward);
        let intent = engine.step(&play_on(Role::Forward, Observation::at(3).with_ball(1.5, 0.0)));

        assert_eq!(intent.dash, 60.0);
    }

    #[test]
    fn test_crowded_approach_follows_detour() {
        let mut engine = engine(Role::Midfielder);
        let crowded = play_on(
            Role::Midfielder,
            Observation::at(3)
                .with_ball(20.0, 0.0)
                .with_player(PlayerSide::Right, Some(2), 3.0, 30.0)
                .with_player(PlayerSide::Right, Some(3), 3.0, -30.0),
        );

        let intent = engine.step(&crowded);
        assert!(engine.path().is_some());
        assert!(intent.dash > 0.0);
        assert_eq!(engine.state(), DecisionState::ApproachBall);

        let open = play_on(Role::Midfielder, Observation::at(4).with_ball(18.0, 0.0));
        engine.step(&open);
        assert!(engine.path().is_none());
    }

    #[test]
    fn test_detour_cleared_when_ball_lost() {
        let mut engine = engine(Role::Midfielder);
        engine.step(&play_on(
            Role::Midfielder,
            Observation::at(3)
                .with_ball(20.0, 0.0)
                .with_player(PlayerSide::Right, Some(2), 3.0, 30.0)
                .with_player(PlayerSide::Right, Some(3), 3.0, -30.0),
        ));
        assert!(engine.path().is_some());

        engine.step(&play_on(
            Role::Midfielder,
            Observation::at(4)
                .with_player(PlayerSide::Right, Some(2), 3.0, 30.0)
                .with_player(PlayerSide::Right, Some(3), 3.0, -30.0),
        ));
        assert!(engine.path().is_none());
    }

    #[test]
    fn test_unreachable_ball_falls_back_to_potential_field() {
        fn sighting(x: f32, y: f32) -> (f32, f32) {
            (x.hypot(y), y.atan2(x).to_degrees())
        }

        // Both cells flanking the ball cell block everything around it.
        let (left_dist, left_dir) = sighting(18.5, 1.0);
        let (right_dist, right_dir) = sighting(22.5, 1.0);

        let mut engine = engine(Role::Midfielder);
        let intent = engine.step(&play_on(
            Role::Midfielder,
            Observation::at(3)
                .with_ball(20.0, 0.0)
                .with_player(PlayerSide::Right, Some(2), 3.0, 30.0)
                .with_player(PlayerSide::Right, Some(3), 3.0, -30.0)
                .with_player(PlayerSide::Right, Some(4), left_dist, left_dir)
                .with_player(PlayerSide::Right, Some(5), right_dist, right_dir),
        ));

        assert!(engine.path().is_none());
        assert_eq!(engine.state(), DecisionState::ApproachBall);
        assert_ne!(intent, ActionIntent::idle());
        assert!(intent.dash > 0.0);
        assert!(intent.kick.is_none());
    }

    #[test]
    fn test_detour_persists_with_absolute_pose() {
        let mut engine = engine(Role::Forward);
        let pose = Pose {
            x: -10.0,
            y: 5.0,
            body: 0.0,
        };
        let observation = Observation::at(3)
            .with_pose(pose)
            .with_ball(20.0, 0.0)
            .with_player(PlayerSide::Right, Some(2), 3.0, 30.0)
            .with_player(PlayerSide::Right, Some(3), 3.0, -30.0);

        engine.step(&play_on(Role::Forward, observation.clone()));
        let first = engine.path().cloned().expect("detour planned");

        assert_eq!(first.waypoints()[0], Vector2::new(-10.0, 5.0));

        engine.step(&play_on(Role::Forward, observation));
        let second = engine.path().cloned().expect("detour kept");
        assert_eq!(first.waypoints(), second.waypoints());
    }

    #[test]
    fn test_for_player_uses_role_manager() {
        struct AllGoalies;

        impl RoleManager for AllGoalies {
            fn role(&self, _unum: u8) -> Role {
                Role::Goalie
            }

            fn initial_position(&self, _unum: u8) -> Vector2<f32> {
                Vector2::new(-50.0, 0.0)
            }
        }

        let engine = DecisionEngine::for_player(3, &AllGoalies, EngineConfig::default());
        assert_eq!(engine.role(), Role::Goalie);
        assert_eq!(engine.profile(), &RoleProfile::for_role(Role::Goalie));
    }

    proptest! {
        #[test]
        fn prop_dead_ball_is_always_idle(
            dist in 0.0f32..80.0,
            dir in -180.0f32..180.0,
            opponent_dist in 0.0f32..10.0,
        ) {
            let mut engine = engine(Role::Forward);
            let world = world(
                Role::Forward,
                9,
                PlayMode::Goal(PlayerSide::Right),
                Observation::at(10)
                    .with_ball(dist, dir)
                    .with_player(PlayerSide::Right, Some(1), opponent_dist, dir),
            );

            prop_assert_eq!(engine.step(&world), ActionIntent::idle());
        }

        #[test]
        fn prop_intent_is_always_in_range(
            dist in 0.0f32..80.0,
            dir in -180.0f32..180.0,
            opponent_dist in 0.0f32..10.0,
            opponent_dir in -180.0f32..180.0,
        ) {
            let mut engine = engine(Role::Midfielder);
            let world = play_on(
                Role::Midfielder,
                Observation::at(10)
                    .with_ball(dist, dir)
                    .with_player(PlayerSide::Right, Some(1), opponent_dist, opponent_dir)
                    .with_player(PlayerSide::Right, Some(2), opponent_dist, -opponent_dir),
            );

            let intent = engine.step(&world);
            prop_assert!(intent.turn > -180.0 && intent.turn <= 180.0);
            prop_assert!((0.0..=100.0).contains(&intent.dash));
            if let Some(kick) = intent.kick {
                prop_assert!((0.0..=100.0).contains(&kick.power));
            }
        }
    }
}

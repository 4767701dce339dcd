use crate::roles::Role;
use crate::world::{BallSighting, GoalSighting, Observation, PlayMode, PlayerSide, PlayerSighting, Pose};
use log::debug;
use std::collections::HashMap;

pub const STAMINA_MAX: f32 = 8000.0;

/// Per-agent memory of the most recent observation.
///
/// Owned by exactly one agent. Holds data only; every decision is taken elsewhere.
#[derive(Debug, Clone)]
pub struct WorldModel {
    pub time: u32,
    pub play_mode: PlayMode,

    pub side: PlayerSide,
    pub unum: u8,
    pub role: Role,

    pub stamina: f32,

    /// `None` means the ball is not visible right now, not that it sits at the origin.
    pub ball: Option<BallSighting>,
    pub goals: Vec<GoalSighting>,
    last_goal_seen: HashMap<PlayerSide, GoalSighting>,

    pub teammates: Vec<PlayerSighting>,
    pub opponents: Vec<PlayerSighting>,

    pub self_pose: Option<Pose>,
}

impl WorldModel {
    pub fn new(side: PlayerSide, unum: u8, role: Role) -> Self {
        WorldModel {
            time: 0,
            play_mode: PlayMode::default(),
            side,
            unum,
            role,
            stamina: STAMINA_MAX,
            ball: None,
            goals: Vec::new(),
            last_goal_seen: HashMap::new(),
            teammates: Vec::new(),
            opponents: Vec::new(),
            self_pose: None,
        }
    }

    /// Applies a visual snapshot: time, ball, goals and both player lists.
    ///
    /// Player lists are rebuilt from scratch. Sightings with a negative or
    /// non-finite distance are dropped.
    pub fn update_from_observation(&mut self, observation: &Observation) {
        if let Some(time) = observation.time {
            self.time = self.time.max(time);
        }

        self.ball = observation.ball.filter(|ball| {
            let valid = ball.is_valid();
            if !valid {
                debug!("player {}: dropping malformed ball sighting {:?}", self.unum, ball);
            }
            valid
        });

        self.goals = observation
            .goals
            .iter()
            .filter(|goal| goal.is_valid())
            .copied()
            .collect();

        for goal in &self.goals {
            self.last_goal_seen.insert(goal.side, *goal);
        }

        let (teammates, opponents): (Vec<_>, Vec<_>) = observation
            .players
            .iter()
            .filter(|player| player.is_valid())
            .cloned()
            .partition(|player| player.side == self.side);

        self.teammates = teammates;
        self.opponents = opponents;

        self.self_pose = observation.self_pose;
    }

    pub fn update_from_body_sense(&mut self, stamina: Option<f32>) {
        if let Some(stamina) = stamina.filter(|s| s.is_finite()) {
            self.stamina = stamina;
        }
    }

    pub fn update_play_mode(&mut self, play_mode: PlayMode) {
        self.play_mode = play_mode;
    }

    /// Applies everything an observation carries: the visual part, then the
    /// optional referee mode and stamina.
    pub fn absorb(&mut self, observation: &Observation) {
        self.update_from_observation(observation);

        if let Some(mode) = &observation.referee_mode {
            self.update_play_mode(mode.clone());
        }

        self.update_from_body_sense(observation.stamina);
    }

    pub fn last_goal_seen(&self, side: PlayerSide) -> Option<&GoalSighting> {
        self.last_goal_seen.get(&side)
    }

    /// Current sighting of the goal on `side`, else the cached one.
    pub fn goal(&self, side: PlayerSide) -> Option<GoalSighting> {
        self.goals
            .iter()
            .find(|goal| goal.side == side)
            .or_else(|| self.last_goal_seen(side))
            .copied()
    }

    pub fn opponent_goal(&self) -> Option<GoalSighting> {
        self.goal(self.side.opposite())
    }

    pub fn opponents_within(&self, radius: f32) -> impl Iterator<Item = &PlayerSighting> {
        self.opponents.iter().filter(move |opponent| opponent.dist < radius)
    }

    pub fn is_own_kick_off(&self) -> bool {
        self.play_mode.is_kick_off_for(self.side)
    }

    pub fn self_pose_or_origin(&self) -> Pose {
        self.self_pose.unwrap_or_else(Pose::origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn world() -> WorldModel {
        WorldModel::new(PlayerSide::Left, 7, Role::Midfielder)
    }

    #[test]
    fn test_new_world_defaults() {
        let world = world();
        assert_eq!(world.time, 0);
        assert_eq!(world.play_mode, PlayMode::BeforeKickOff);
        assert_eq!(world.stamina, STAMINA_MAX);
        assert!(world.ball.is_none());
        assert!(world.goals.is_empty());
    }

    #[test]
    fn test_ball_absent_after_observation_without_ball() {
        let mut world = world();
        world.update_from_observation(&Observation::at(1).with_ball(5.0, 10.0));
        assert!(world.ball.is_some());

        world.update_from_observation(&Observation::at(2));
        assert!(world.ball.is_none());
    }

    #[test]
    fn test_players_partitioned_by_side() {
        let mut world = world();
        let observation = Observation::at(3)
            .with_player(PlayerSide::Left, Some(2), 10.0, 5.0)
            .with_player(PlayerSide::Right, Some(9), 7.0, -20.0)
            .with_player(PlayerSide::Right, None, 30.0, 40.0);

        world.update_from_observation(&observation);

        assert_eq!(world.teammates.len(), 1);
        assert_eq!(world.teammates[0].unum, Some(2));
        assert_eq!(world.opponents.len(), 2);
    }

    #[test]
    fn test_player_lists_replaced_wholesale() {
        let mut world = world();
        world.update_from_observation(
            &Observation::at(1).with_player(PlayerSide::Right, Some(4), 3.0, 0.0),
        );
        world.update_from_observation(&Observation::at(2));

        assert!(world.opponents.is_empty());
        assert!(world.teammates.is_empty());
    }

    #[test]
    fn test_last_goal_seen_survives_goal_leaving_view() {
        let mut world = world();
        world.update_from_observation(&Observation::at(1).with_goal(PlayerSide::Right, 30.0, 12.0));
        world.update_from_observation(&Observation::at(2));

        assert!(world.goals.is_empty());
        let cached = world.opponent_goal().unwrap();
        assert_eq!(cached.dist, 30.0);
        assert_eq!(cached.dir, 12.0);

        world.update_from_observation(&Observation::at(3).with_goal(PlayerSide::Right, 25.0, 8.0));
        assert_eq!(world.last_goal_seen(PlayerSide::Right).unwrap().dist, 25.0);
    }

    #[test]
    fn test_time_is_monotonic() {
        let mut world = world();
        world.update_from_observation(&Observation::at(10));
        world.update_from_observation(&Observation::at(7));
        assert_eq!(world.time, 10);

        world.update_from_observation(&Observation::default());
        assert_eq!(world.time, 10);
    }

    #[test]
    fn test_body_sense_only_touches_stamina() {
        let mut world = world();
        world.update_from_observation(&Observation::at(1).with_ball(3.0, 0.0));

        world.update_from_body_sense(Some(4200.0));
        assert_eq!(world.stamina, 4200.0);
        assert!(world.ball.is_some());

        world.update_from_body_sense(None);
        assert_eq!(world.stamina, 4200.0);
    }

    #[test]
    fn test_malformed_ball_is_dropped() {
        let mut world = world();
        world.update_from_observation(&Observation::at(1).with_ball(-3.0, 0.0));
        assert!(world.ball.is_none());
    }

    #[test]
    fn test_absorb_applies_referee_mode_and_stamina() {
        let mut world = world();
        let observation = Observation::at(5)
            .with_referee_mode(PlayMode::PlayOn)
            .with_stamina(6000.0);

        world.absorb(&observation);
        assert_eq!(world.play_mode, PlayMode::PlayOn);
        assert_eq!(world.stamina, 6000.0);

        world.absorb(&Observation::at(6));
        assert_eq!(world.play_mode, PlayMode::PlayOn);
    }

    #[test]
    fn test_own_kick_off() {
        let mut world = world();
        world.update_play_mode(PlayMode::KickOff(PlayerSide::Left));
        assert!(world.is_own_kick_off());

        world.update_play_mode(PlayMode::KickOff(PlayerSide::Right));
        assert!(!world.is_own_kick_off());
    }

    fn side_strategy() -> impl Strategy<Value = PlayerSide> {
        prop_oneof![Just(PlayerSide::Left), Just(PlayerSide::Right)]
    }

    proptest! {
        #[test]
        fn prop_partition_covers_every_player_once(
            players in prop::collection::vec((side_strategy(), 0.0f32..80.0, -180.0f32..180.0), 0..22)
        ) {
            let mut world = world();
            let mut observation = Observation::at(1);
            for (side, dist, dir) in &players {
                observation = observation.with_player(*side, None, *dist, *dir);
            }

            world.update_from_observation(&observation);

            prop_assert_eq!(world.teammates.len() + world.opponents.len(), players.len());
            prop_assert!(world.teammates.iter().all(|p| p.side == PlayerSide::Left));
            prop_assert!(world.opponents.iter().all(|p| p.side == PlayerSide::Right));
        }

        #[test]
        fn prop_no_ball_sighting_means_no_ball(
            first_dist in 0.0f32..60.0,
            dir in -180.0f32..180.0,
            time in 0u32..6000,
        ) {
            let mut world = world();
            world.update_from_observation(&Observation::at(time).with_ball(first_dist, dir));
            world.update_from_observation(&Observation::at(time + 1));
            prop_assert!(world.ball.is_none());
        }
    }
}

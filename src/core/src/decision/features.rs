use crate::world::{PlayerSide, PlayerSighting, STAMINA_MAX, WorldModel};
use itertools::Itertools;

pub const FEATURE_COUNT: usize = neural::ACTOR_INPUT_SIZE;

const TEAMMATE_SLOTS: usize = 10;
const OPPONENT_SLOTS: usize = 11;

const BALL_RANGE: f32 = 60.0;
const GOAL_RANGE: f32 = 120.0;
const PLAYER_RANGE: f32 = 60.0;

/// Placeholder for anything not currently seen.
const UNSEEN: [f32; 2] = [-1.0, 0.0];

/// Flattens a world model into the fixed-size input of the policy network.
///
/// Layout: ball (2), stamina (1), left and right goal (2 each), the nearest
/// teammates (2 each) and the nearest opponents (2 each). Distances are
/// scaled into roughly [0, 1] and directions into [-1, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn extract(&self, world: &WorldModel) -> Vec<f32> {
        let mut features = Vec::with_capacity(FEATURE_COUNT);

        match &world.ball {
            Some(ball) => features.extend([(ball.dist / BALL_RANGE).min(1.0), ball.dir / 180.0]),
            None => features.extend(UNSEEN),
        }

        features.push(world.stamina / STAMINA_MAX);

        for side in [PlayerSide::Left, PlayerSide::Right] {
            match world.goals.iter().find(|goal| goal.side == side) {
                Some(goal) => features.extend([goal.dist / GOAL_RANGE, goal.dir / 180.0]),
                None => features.extend(UNSEEN),
            }
        }

        features.extend(Self::nearest(&world.teammates, TEAMMATE_SLOTS));
        features.extend(Self::nearest(&world.opponents, OPPONENT_SLOTS));

        features
    }

    fn nearest(players: &[PlayerSighting], slots: usize) -> Vec<f32> {
        players
            .iter()
            .sorted_by(|a, b| a.dist.total_cmp(&b.dist))
            .map(|player| [player.dist / PLAYER_RANGE, player.dir / 180.0])
            .pad_using(slots, |_| UNSEEN)
            .take(slots)
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;
    use crate::world::Observation;

    #[test]
    fn test_empty_world_layout() {
        let world = WorldModel::new(PlayerSide::Left, 4, Role::CenterBack);
        let features = FeatureExtractor.extract(&world);

        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(&features[0..2], &[-1.0, 0.0]);
        assert_eq!(features[2], 1.0);
        assert!(features[3..].chunks(2).all(|pair| pair == UNSEEN));
    }

    #[test]
    fn test_seen_objects_are_scaled() {
        let mut world = WorldModel::new(PlayerSide::Left, 4, Role::CenterBack);
        world.update_from_observation(
            &Observation::at(5)
                .with_ball(90.0, 90.0)
                .with_goal(PlayerSide::Right, 60.0, -45.0)
                .with_player(PlayerSide::Left, Some(2), 30.0, 18.0)
                .with_player(PlayerSide::Left, Some(3), 6.0, -36.0)
                .with_player(PlayerSide::Right, Some(9), 12.0, 0.0),
        );
        world.update_from_body_sense(Some(4000.0));

        let features = FeatureExtractor.extract(&world);
        assert_eq!(features.len(), FEATURE_COUNT);

        // Ball distance is capped.
        assert_eq!(&features[0..2], &[1.0, 0.5]);
        assert_eq!(features[2], 0.5);

        // Left goal unseen, right goal seen.
        assert_eq!(&features[3..5], &[-1.0, 0.0]);
        assert_eq!(&features[5..7], &[0.5, -0.25]);

        // Teammates nearest first.
        assert_eq!(&features[7..9], &[0.1, -0.2]);
        assert_eq!(&features[9..11], &[0.5, 0.1]);
        assert_eq!(&features[11..13], &[-1.0, 0.0]);

        // First opponent slot starts after the ten teammate slots.
        assert_eq!(&features[27..29], &[0.2, 0.0]);
        assert_eq!(&features[29..31], &[-1.0, 0.0]);
    }

    #[test]
    fn test_extra_players_are_truncated() {
        let mut observation = Observation::at(1);
        for unum in 1..=11u8 {
            observation = observation.with_player(PlayerSide::Left, Some(unum), unum as f32, 0.0);
        }

        let mut world = WorldModel::new(PlayerSide::Left, 12, Role::Midfielder);
        world.update_from_observation(&observation);

        let features = FeatureExtractor.extract(&world);
        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(features[25], 10.0 / 60.0);
    }
}

use crate::decision::Kick;
use crate::tactics::{TacticsEvaluator, lane_blocked};
use crate::world::{PlayerSide, WorldModel};

impl TacticsEvaluator {
    /// Shot at the goal of the side opposite `my_side`, or `None` when the goal
    /// is unknown, out of range or screened by an opponent.
    pub fn evaluate_shot(&self, world: &WorldModel, my_side: PlayerSide) -> Option<Kick> {
        self.evaluate_shot_within(world, my_side, self.config.shot_cutoff)
    }

    /// Same as [`evaluate_shot`](Self::evaluate_shot) with a tighter range;
    /// the configured cutoff still applies.
    pub fn evaluate_shot_within(
        &self,
        world: &WorldModel,
        my_side: PlayerSide,
        range: f32,
    ) -> Option<Kick> {
        let goal = world.goal(my_side.opposite())?;

        let range = range.min(self.config.shot_cutoff);
        if goal.dist > range {
            return None;
        }

        if lane_blocked(&world.opponents, goal.dist, goal.dir, self.config.shot_tolerance) {
            return None;
        }

        Some(Kick::new(self.config.shot_power, goal.dir))
    }
}

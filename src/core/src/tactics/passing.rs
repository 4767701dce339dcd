use crate::decision::Kick;
use crate::tactics::{TacticsEvaluator, lane_blocked};
use crate::world::{PlayerSighting, WorldModel};
use log::trace;

impl TacticsEvaluator {
    /// Best pass to a visible teammate, or `None` when nobody is open.
    ///
    /// Candidates must sit between the minimum and maximum pass distance and
    /// have a clear lane. Forward teammates earn a bonus and longer passes
    /// score higher; the first of equally scored candidates wins.
    pub fn evaluate_pass(&self, world: &WorldModel, self_unum: u8) -> Option<Kick> {
        let config = &self.config;

        let mut best: Option<(&PlayerSighting, f32)> = None;

        for mate in &world.teammates {
            if mate.unum == Some(self_unum) {
                continue;
            }

            if mate.dist < config.pass_min_distance || mate.dist > config.pass_max_distance {
                continue;
            }

            let (score, blocked) = self.pass_score(world, mate);
            if blocked {
                trace!("pass lane to {:?} blocked, score {}", mate.unum, score);
                continue;
            }

            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((mate, score)),
            }
        }

        best.map(|(mate, _)| {
            let power = (config.pass_base_power + mate.dist * config.pass_power_per_unit).min(100.0);
            Kick::new(power, mate.dir)
        })
    }

    /// Raw candidate score and whether its lane is blocked. Blocked lanes
    /// carry the penalty.
    fn pass_score(&self, world: &WorldModel, mate: &PlayerSighting) -> (f32, bool) {
        let config = &self.config;
        let mut score = 0.0;

        let blocked = lane_blocked(&world.opponents, mate.dist, mate.dir, config.pass_tolerance);
        if blocked {
            score -= config.pass_blocked_penalty;
        }

        if mate.dir.abs() < config.pass_forward_cone {
            score += config.pass_forward_bonus;
        }

        (score + mate.dist * config.pass_distance_weight, blocked)
    }
}

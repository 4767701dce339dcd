use crate::decision::{ActionIntent, ActionPolicy, DecisionEngine, DecisionState, EngineConfig, LearnedStrategy};
use crate::roles::Role;
use crate::world::WorldModel;
use log::info;

/// Anything that turns a world model into one action per tick.
pub trait DecisionStrategy: Send {
    fn step(&mut self, world: &WorldModel) -> ActionIntent;

    fn name(&self) -> &'static str;

    /// Label of the branch taken on the last tick, for logs.
    fn state(&self) -> DecisionState;
}

impl DecisionStrategy for DecisionEngine {
    fn step(&mut self, world: &WorldModel) -> ActionIntent {
        DecisionEngine::step(self, world)
    }

    fn name(&self) -> &'static str {
        "classic"
    }

    fn state(&self) -> DecisionState {
        DecisionEngine::state(self)
    }
}

pub struct StrategySelector;

impl StrategySelector {
    /// The learned strategy when a policy is available, else the classic engine.
    pub fn select(
        role: Role,
        config: EngineConfig,
        policy: Option<Box<dyn ActionPolicy>>,
    ) -> Box<dyn DecisionStrategy> {
        let engine = DecisionEngine::new(role, config);

        match policy {
            Some(policy) => {
                info!("{} plays with the learned policy", role);
                Box::new(LearnedStrategy::new(policy, engine))
            }
            None => Box::new(engine),
        }
    }
}

use crate::decision::{ActionIntent, DecisionEngine, DecisionState, DecisionStrategy, FeatureExtractor, Kick, MAX_POWER};
use crate::world::WorldModel;
use log::warn;
use neural::{ActorNetwork, DefaultNeuralBackend, NeuralError};

pub use neural::ActorOutput as PolicyOutput;

const KICK_PROBABILITY_THRESHOLD: f32 = 0.5;

/// Source of learned actions: head activations for one feature vector.
pub trait ActionPolicy: Send {
    fn infer(&self, features: &[f32]) -> Result<PolicyOutput, NeuralError>;
}

impl ActionPolicy for ActorNetwork<DefaultNeuralBackend> {
    fn infer(&self, features: &[f32]) -> Result<PolicyOutput, NeuralError> {
        ActorNetwork::infer(self, features)
    }
}

/// Plays the policy's action, and the classic engine's whenever the policy
/// fails or produces non-finite values. Referee stoppages always go through
/// the classic engine.
pub struct LearnedStrategy {
    policy: Box<dyn ActionPolicy>,
    features: FeatureExtractor,
    fallback: DecisionEngine,
    state: DecisionState,
    warned: bool,
}

impl LearnedStrategy {
    pub fn new(policy: Box<dyn ActionPolicy>, fallback: DecisionEngine) -> Self {
        LearnedStrategy {
            policy,
            features: FeatureExtractor,
            fallback,
            state: DecisionState::default(),
            warned: false,
        }
    }

    fn to_intent(output: &PolicyOutput) -> ActionIntent {
        let kick = (output.kick_probability > KICK_PROBABILITY_THRESHOLD)
            .then(|| Kick::new(output.kick_power * MAX_POWER, output.kick_angle * 180.0));

        ActionIntent {
            turn: output.turn * 180.0,
            dash: output.dash * MAX_POWER,
            kick,
        }
        .sanitized()
    }

    fn fall_back(&mut self, world: &WorldModel, reason: &str) -> ActionIntent {
        if !self.warned {
            warn!("player {}: learned policy unusable ({}), using classic engine", world.unum, reason);
            self.warned = true;
        }

        let intent = self.fallback.step(world);
        self.state = self.fallback.state();
        intent
    }
}

impl DecisionStrategy for LearnedStrategy {
    fn step(&mut self, world: &WorldModel) -> ActionIntent {
        if world.play_mode.is_dead_ball() {
            let intent = self.fallback.step(world);
            self.state = self.fallback.state();
            return intent;
        }

        let features = self.features.extract(world);

        match self.policy.infer(&features) {
            Ok(output) if output.is_finite() => {
                self.state = DecisionState::Learned;
                Self::to_intent(&output)
            }
            Ok(_) => self.fall_back(world, "non-finite output"),
            Err(e) => self.fall_back(world, &e.to_string()),
        }
    }

    fn name(&self) -> &'static str {
        "learned"
    }

    fn state(&self) -> DecisionState {
        self.state
    }
}

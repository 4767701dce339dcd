use crate::NeuralError;
use burn::config::Config;
use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::{Backend, Module};
use burn::record::{BinBytesRecorder, FullPrecisionSettings, Recorder};
use burn::tensor::activation::sigmoid;
use burn::tensor::{Tensor, TensorData};
use log::{debug, warn};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

pub const ACTOR_INPUT_SIZE: usize = 49;
pub const ACTOR_HIDDEN_SIZE: usize = 128;

/// Raw head activations: `dash`, `kick_probability` and `kick_power` in
/// [0, 1]; `turn` and `kick_angle` in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorOutput {
    pub dash: f32,
    pub turn: f32,
    pub kick_probability: f32,
    pub kick_power: f32,
    pub kick_angle: f32,
}

impl ActorOutput {
    pub fn is_finite(&self) -> bool {
        [
            self.dash,
            self.turn,
            self.kick_probability,
            self.kick_power,
            self.kick_angle,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}

/// Policy network: two ReLU layers shared by five single-output heads.
#[derive(Module, Debug)]
pub struct ActorNetwork<B: Backend> {
    hidden_a: Linear<B>,
    hidden_b: Linear<B>,

    dash: Linear<B>,
    turn: Linear<B>,
    kick_probability: Linear<B>,
    kick_power: Linear<B>,
    kick_angle: Linear<B>,

    activation: Relu,
}

impl<B: Backend> ActorNetwork<B> {
    /// Loads a network saved with the binary recorder.
    pub fn from_bytes(bytes: Vec<u8>, device: &B::Device) -> Result<Self, NeuralError> {
        let size = bytes.len();

        // The binary recorder panics on truncated input instead of failing.
        let loaded = catch_unwind(AssertUnwindSafe(|| {
            BinBytesRecorder::<FullPrecisionSettings>::default().load(bytes, device)
        }));

        let record: ActorNetworkRecord<B> = match loaded {
            Ok(Ok(record)) => record,
            Ok(Err(e)) => return Err(NeuralError::Record(format!("{:?}", e))),
            Err(_) => {
                warn!("actor record of {} bytes is truncated or corrupt", size);
                return Err(NeuralError::Record(format!("corrupt record of {} bytes", size)));
            }
        };

        let network = ActorNetworkConfig::new().init(device).load_record(record);
        if let Err(e) = network.validate() {
            warn!("actor record rejected: {}", e);
            return Err(e);
        }

        debug!("actor network loaded from {} bytes", size);
        Ok(network)
    }

    pub fn from_file(path: impl AsRef<Path>, device: &B::Device) -> Result<Self, NeuralError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes, device)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, NeuralError> {
        BinBytesRecorder::<FullPrecisionSettings>::default()
            .record(self.clone().into_record(), ())
            .map_err(|e| NeuralError::Record(format!("{:?}", e)))
    }

    /// Checks the loaded layers chain together and take the feature vector.
    pub fn validate(&self) -> Result<(), NeuralError> {
        let [input, hidden] = self.hidden_a.weight.val().dims();
        if input != ACTOR_INPUT_SIZE {
            return Err(NeuralError::Shape {
                layer: "hidden_a",
                expected: vec![ACTOR_INPUT_SIZE, hidden],
                actual: vec![input, hidden],
            });
        }

        check_layer("hidden_b", &self.hidden_b, [hidden, hidden])?;

        for (name, head) in [
            ("dash", &self.dash),
            ("turn", &self.turn),
            ("kick_probability", &self.kick_probability),
            ("kick_power", &self.kick_power),
            ("kick_angle", &self.kick_angle),
        ] {
            check_layer(name, head, [hidden, 1])?;
        }

        Ok(())
    }

    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let out = self.activation.forward(self.hidden_a.forward(input));
        self.activation.forward(self.hidden_b.forward(out))
    }

    pub fn infer(&self, features: &[f32]) -> Result<ActorOutput, NeuralError> {
        if features.len() != ACTOR_INPUT_SIZE {
            return Err(NeuralError::Shape {
                layer: "input",
                expected: vec![ACTOR_INPUT_SIZE],
                actual: vec![features.len()],
            });
        }

        let device = self.hidden_a.weight.val().device();
        let input = Tensor::<B, 2>::from_data(
            TensorData::new(features.to_vec(), [1, features.len()]),
            &device,
        );

        let hidden = self.forward(input);

        Ok(ActorOutput {
            dash: head_value("dash", sigmoid(self.dash.forward(hidden.clone())))?,
            turn: head_value("turn", self.turn.forward(hidden.clone()).tanh())?,
            kick_probability: head_value(
                "kick_probability",
                sigmoid(self.kick_probability.forward(hidden.clone())),
            )?,
            kick_power: head_value("kick_power", sigmoid(self.kick_power.forward(hidden.clone())))?,
            kick_angle: head_value("kick_angle", self.kick_angle.forward(hidden).tanh())?,
        })
    }
}

fn check_layer<B: Backend>(
    name: &'static str,
    layer: &Linear<B>,
    expected: [usize; 2],
) -> Result<(), NeuralError> {
    let actual = layer.weight.val().dims();
    if actual != expected {
        return Err(NeuralError::Shape {
            layer: name,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        });
    }

    Ok(())
}

fn head_value<B: Backend>(name: &'static str, tensor: Tensor<B, 2>) -> Result<f32, NeuralError> {
    tensor
        .into_data()
        .to_vec::<f32>()
        .ok()
        .and_then(|values| values.first().copied())
        .ok_or(NeuralError::Output(name))
}

#[derive(Debug, Config)]
pub struct ActorNetworkConfig {
    #[config(default = "ACTOR_INPUT_SIZE")]
    input_size: usize,
    #[config(default = "ACTOR_HIDDEN_SIZE")]
    hidden_size: usize,
}

impl ActorNetworkConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ActorNetwork<B> {
        let head = || LinearConfig::new(self.hidden_size, 1).with_bias(true).init(device);

        ActorNetwork {
            hidden_a: LinearConfig::new(self.input_size, self.hidden_size)
                .with_bias(true)
                .init(device),
            hidden_b: LinearConfig::new(self.hidden_size, self.hidden_size)
                .with_bias(true)
                .init(device),
            dash: head(),
            turn: head(),
            kick_probability: head(),
            kick_power: head(),
            kick_angle: head(),
            activation: Relu::new(),
        }
    }
}

#![recursion_limit = "256"]

mod actor;
mod error;

use burn::backend::NdArray;
use burn::backend::ndarray::NdArrayDevice;

pub use actor::*;
pub use error::*;

// DEFAULTS

pub type DefaultNeuralBackend = NdArray;

pub const DEFAULT_NEURAL_DEVICE: NdArrayDevice = NdArrayDevice::Cpu;

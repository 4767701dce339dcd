mod config;
mod engine;
mod features;
mod intent;
mod learned;
mod state;
mod strategy;

pub use config::*;
pub use engine::*;
pub use features::*;
pub use intent::*;
pub use learned::*;
pub use state::*;
pub use strategy::*;

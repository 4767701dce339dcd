mod error;
mod formation;
mod loader;

pub use error::*;
pub use formation::*;
pub use loader::*;

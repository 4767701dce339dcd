pub mod decision;
pub mod planning;
pub mod roles;
pub mod tactics;
pub mod world;

pub mod utils;

pub use decision::*;
pub use planning::*;
pub use roles::*;
pub use tactics::*;
pub use world::*;

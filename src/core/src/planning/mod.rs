mod forces;
mod grid;
mod waypoints;

pub use forces::*;
pub use grid::*;
pub use waypoints::*;

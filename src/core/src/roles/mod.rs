mod manager;
mod profile;
mod role;

pub use manager::*;
pub use profile::*;
pub use role::*;

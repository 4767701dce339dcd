mod agent;
mod config;
mod connection;
mod error;
mod logger;
mod team;

pub mod protocol;

pub use agent::*;
pub use config::*;
pub use connection::*;
pub use error::*;
pub use logger::*;
pub use team::*;

mod command;
mod message;
mod sexpr;

pub use command::*;
pub use message::*;
pub use sexpr::*;

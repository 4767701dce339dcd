mod model;
mod observation;
mod play_mode;
mod side;

pub use model::*;
pub use observation::*;
pub use play_mode::*;
pub use side::*;

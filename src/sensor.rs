mod board;
mod simulated;

pub use board::*;
pub use simulated::*;

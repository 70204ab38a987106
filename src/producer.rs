mod kafka;
mod publisher;

pub use kafka::*;
pub use publisher::*;

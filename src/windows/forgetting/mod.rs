mod forgetting_strategy;
mod threshold;

pub use forgetting_strategy::ForgettingStrategy;
pub use threshold::{ClassFloor, Threshold};

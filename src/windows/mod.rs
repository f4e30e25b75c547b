pub mod forgetting;
mod window;

pub use forgetting::{ClassFloor, ForgettingStrategy, Threshold};
pub use window::{Partition, Window, WindowKind, WindowSnapshot, WindowStats};

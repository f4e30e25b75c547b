mod active_learning;
mod engine;
mod error;
mod evaluation;
mod models;
mod windows;

pub use error::BuildError;

pub use active_learning::{build_active_learner, build_oracle};
pub use engine::build_engine;
pub use evaluation::build_evaluation;
pub use models::{build_classifier, build_pipeline};
pub use windows::build_window;

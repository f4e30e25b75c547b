mod evaluation_strategy;
mod hold_out;
mod prequential;

pub use evaluation_strategy::{EvaluationStrategy, evaluate_records};
pub use hold_out::HoldOut;
pub use prequential::Prequential;

mod entropy;
mod max_margin;
mod max_posterior;
mod measure;

pub use entropy::Entropy;
pub use max_margin::MaxMargin;
pub use max_posterior::MaxPosterior;
pub use measure::{Measure, MeasureKind, measure_for};

mod criteria;
mod measurement;
pub mod statistics;
pub mod strategies;

pub use criteria::EvaluationCriteria;
pub use measurement::Measurement;
pub use statistics::{CurveFormat, PhaseTimings, StatisticsRow, StatisticsTable, TimepointReport};
pub use strategies::{EvaluationStrategy, HoldOut, Prequential, evaluate_records};

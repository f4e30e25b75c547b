mod fixed_uncertainty;
mod random;
mod randomized_variable_uncertainty;
mod strategy;
mod variable_uncertainty;

pub use fixed_uncertainty::FixedUncertainty;
pub use random::RandomSampling;
pub use randomized_variable_uncertainty::RandomizedVariableUncertainty;
pub use strategy::{ActiveLearningStats, ActiveLearningStrategy, StrategyBase};
pub use variable_uncertainty::VariableUncertainty;

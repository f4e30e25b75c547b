pub mod measures;
pub mod strategies;

pub use measures::{Entropy, MaxMargin, MaxPosterior, Measure, MeasureKind, measure_for};
pub use strategies::{
    ActiveLearningStats, ActiveLearningStrategy, FixedUncertainty, RandomSampling,
    RandomizedVariableUncertainty, StrategyBase, VariableUncertainty,
};

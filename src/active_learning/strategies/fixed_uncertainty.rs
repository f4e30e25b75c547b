use crate::active_learning::strategies::{ActiveLearningStrategy, StrategyBase};

/// Uncertainty sampling against a threshold that never moves.
pub struct FixedUncertainty {
    base: StrategyBase,
    threshold: f64,
}

impl FixedUncertainty {
    pub fn new(base: StrategyBase, threshold: f64) -> Self {
        Self { base, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl ActiveLearningStrategy for FixedUncertainty {
    fn name(&self) -> &'static str {
        "fixed_uncertainty"
    }

    fn base(&self) -> &StrategyBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StrategyBase {
        &mut self.base
    }

    fn below_threshold(&mut self, score: f64) -> bool {
        self.base.measure().check(score, self.threshold)
    }
}

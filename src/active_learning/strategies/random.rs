use crate::active_learning::strategies::{ActiveLearningStrategy, StrategyBase};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Queries each record with probability equal to the budget, ignoring its score.
pub struct RandomSampling {
    base: StrategyBase,
    rng: StdRng,
}

impl RandomSampling {
    pub fn new(base: StrategyBase, seed: u64) -> Self {
        Self {
            base,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ActiveLearningStrategy for RandomSampling {
    fn name(&self) -> &'static str {
        "random"
    }

    fn base(&self) -> &StrategyBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StrategyBase {
        &mut self.base
    }

    fn below_threshold(&mut self, _score: f64) -> bool {
        let budget = self.base.budget();
        self.rng.random_bool(budget)
    }

    fn requires_probabilities(&self) -> bool {
        false
    }
}

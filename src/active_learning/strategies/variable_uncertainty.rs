use crate::active_learning::strategies::{ActiveLearningStrategy, StrategyBase};
use crate::error::{Error, Result};

/// Uncertainty sampling with a self-adjusting threshold.
///
/// The threshold starts at the measure's maximum and is updated after every
/// record seen, queried or not: multiplied by `1 - step` when the record was
/// uncertain, by `1 + step` otherwise.
pub struct VariableUncertainty {
    base: StrategyBase,
    threshold: f64,
    step: f64,
}

impl VariableUncertainty {
    pub fn new(base: StrategyBase, step: f64) -> Result<Self> {
        if !(step > 0.0 && step <= 1.0) {
            return Err(Error::config("the step size should be in the range (0,1]"));
        }
        let threshold = base.measure().max_value();
        Ok(Self {
            base,
            threshold,
            step,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Compares `score` against `compare_with` and moves the stored threshold.
    pub(crate) fn decide(&mut self, score: f64, compare_with: f64) -> bool {
        let measure = self.base.measure();
        if measure.check(score, compare_with) {
            self.threshold = measure.decrease_threshold(self.threshold, self.step);
            true
        } else {
            self.threshold = measure.increase_threshold(self.threshold, self.step);
            false
        }
    }

    pub(crate) fn base_ref(&self) -> &StrategyBase {
        &self.base
    }

    pub(crate) fn base_ref_mut(&mut self) -> &mut StrategyBase {
        &mut self.base
    }
}

impl ActiveLearningStrategy for VariableUncertainty {
    fn name(&self) -> &'static str {
        "variable_uncertainty"
    }

    fn base(&self) -> &StrategyBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StrategyBase {
        &mut self.base
    }

    fn below_threshold(&mut self, score: f64) -> bool {
        let threshold = self.threshold;
        self.decide(score, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::active_learning::{Entropy, Measure};
    use crate::oracle::SimpleOracle;
    use crate::testing::dummies::batch_of;

    fn strategy(budget: f64, step: f64) -> VariableUncertainty {
        let base = StrategyBase::new(budget, Box::new(SimpleOracle::default()), Box::new(Entropy))
            .unwrap();
        VariableUncertainty::new(base, step).unwrap()
    }

    #[test]
    fn threshold_starts_at_the_measure_maximum() {
        assert_eq!(strategy(1.0, 0.1).threshold(), 1.0);
    }

    #[test]
    fn step_must_be_in_half_open_unit_interval() {
        for step in [0.0, -0.5, 1.5] {
            let base =
                StrategyBase::new(1.0, Box::new(SimpleOracle::default()), Box::new(Entropy))
                    .unwrap();
            assert!(matches!(
                VariableUncertainty::new(base, step),
                Err(Error::Config(_))
            ));
        }
    }

    #[test]
    fn threshold_walk_is_reproducible_from_scores() {
        let scores = [0.95, 0.1, 0.2, 0.99, 0.5, 0.0, 0.97, 0.3];
        let step = 0.2;
        let mut s = strategy(1.0, step);

        let mut expected = 1.0f64;
        for &score in &scores {
            let queried = Entropy.check(score, expected);
            expected = if queried {
                expected * (1.0 - step)
            } else {
                expected * (1.0 + step)
            };
            assert_eq!(s.below_threshold(score), queried);
            assert!((s.threshold() - expected).abs() < 1e-12);
            assert!(s.threshold() > 0.0);
        }
    }

    #[test]
    fn threshold_moves_for_every_visited_record() {
        let batch = batch_of(0, &["a", "b", "a"]);
        let proba = vec![vec![1.0, 0.0]; 3];
        let mut s = strategy(1.0, 0.5);
        let got = s.select_and_label(&batch, Some(&proba)).unwrap();

        // 1.0 -> 1.5 (confident) -> 0.75 (uncertain, queried) -> 1.125 (confident)
        let labels: Vec<&str> = got.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["b"]);
        assert!((s.threshold() - 1.125).abs() < 1e-12);
    }
}

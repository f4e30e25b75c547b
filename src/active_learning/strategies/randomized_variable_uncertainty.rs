use crate::active_learning::strategies::{
    ActiveLearningStrategy, StrategyBase, VariableUncertainty,
};
use crate::error::{Error, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// [`VariableUncertainty`] whose decision uses a jittered copy of the
/// threshold, `threshold * N(1, variance)`, drawn fresh for every record.
///
/// Only the decision sees the jitter. The stored threshold walks exactly as
/// in the plain variable strategy.
pub struct RandomizedVariableUncertainty {
    inner: VariableUncertainty,
    variance: f64,
    jitter: Normal<f64>,
    rng: StdRng,
}

impl RandomizedVariableUncertainty {
    pub fn new(base: StrategyBase, step: f64, variance: f64, seed: u64) -> Result<Self> {
        if !variance.is_finite() || variance < 0.0 {
            return Err(Error::config("the variance should be a non-negative number"));
        }
        let jitter = Normal::new(1.0, variance.sqrt())
            .map_err(|e| Error::config(format!("invalid jitter distribution: {e}")))?;
        Ok(Self {
            inner: VariableUncertainty::new(base, step)?,
            variance,
            jitter,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn threshold(&self) -> f64 {
        self.inner.threshold()
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }
}

impl ActiveLearningStrategy for RandomizedVariableUncertainty {
    fn name(&self) -> &'static str {
        "variable_randomized_uncertainty"
    }

    fn base(&self) -> &StrategyBase {
        self.inner.base_ref()
    }

    fn base_mut(&mut self) -> &mut StrategyBase {
        self.inner.base_ref_mut()
    }

    fn below_threshold(&mut self, score: f64) -> bool {
        let jittered = self.inner.threshold() * self.jitter.sample(&mut self.rng);
        self.inner.decide(score, jittered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::active_learning::MaxPosterior;
    use crate::oracle::SimpleOracle;

    fn strategy(variance: f64, seed: u64) -> RandomizedVariableUncertainty {
        let base = StrategyBase::new(
            1.0,
            Box::new(SimpleOracle::default()),
            Box::new(MaxPosterior),
        )
        .unwrap();
        RandomizedVariableUncertainty::new(base, 0.1, variance, seed).unwrap()
    }

    #[test]
    fn zero_variance_behaves_like_the_plain_strategy() {
        let mut randomized = strategy(0.0, 1);
        let base = StrategyBase::new(
            1.0,
            Box::new(SimpleOracle::default()),
            Box::new(MaxPosterior),
        )
        .unwrap();
        let mut plain = VariableUncertainty::new(base, 0.1).unwrap();

        for score in [0.9, 0.95, 0.3, 1.0, 0.99, 0.1] {
            assert_eq!(randomized.below_threshold(score), plain.below_threshold(score));
            assert!((randomized.threshold() - plain.threshold()).abs() < 1e-12);
        }
    }

    #[test]
    fn stored_threshold_moves_by_the_plain_step() {
        let mut s = strategy(4.0, 17);
        for score in [0.2, 0.8, 0.5, 0.9, 0.4] {
            let before = s.threshold();
            let queried = s.below_threshold(score);
            let expected = if queried { before * 0.9 } else { before * 1.1 };
            assert!((s.threshold() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn jitter_can_overturn_the_plain_decision() {
        // the plain strategy always queries 0.6 against its starting threshold of 1
        let first_decisions: Vec<(bool, f64)> = (0..64)
            .map(|seed| {
                let mut s = strategy(1.0, seed);
                (s.below_threshold(0.6), s.threshold())
            })
            .collect();

        let skipped = first_decisions.iter().find(|(queried, _)| !queried);
        let (_, threshold) = skipped.expect("some draw lifts 0.6 over the jittered threshold");
        assert!((threshold - 1.1).abs() < 1e-12);
        assert!(first_decisions.iter().any(|(queried, t)| *queried && (t - 0.9).abs() < 1e-12));
    }

    #[test]
    fn negative_variance_is_rejected() {
        let base = StrategyBase::new(
            1.0,
            Box::new(SimpleOracle::default()),
            Box::new(MaxPosterior),
        )
        .unwrap();
        assert!(matches!(
            RandomizedVariableUncertainty::new(base, 0.1, -1.0, 0),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn same_seed_gives_same_decisions() {
        let decisions = |seed| {
            let mut s = strategy(1.0, seed);
            (0..50)
                .map(|i| s.below_threshold((i % 10) as f64 / 10.0))
                .collect::<Vec<_>>()
        };
        assert_eq!(decisions(8), decisions(8));
    }
}

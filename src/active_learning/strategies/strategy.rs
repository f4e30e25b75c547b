use crate::active_learning::measures::Measure;
use crate::core::Record;
use crate::error::{Error, Result};
use crate::oracle::Oracle;
use crate::streams::{Batch, Timepoint};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Oracle counters reported after a timepoint was sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveLearningStats {
    pub queried: usize,
    pub answered: usize,
    pub cost: f64,
}

/// State every querying strategy carries: the budget fraction, the oracle
/// that is paid for labels and the uncertainty measure.
pub struct StrategyBase {
    budget: f64,
    oracle: Box<dyn Oracle>,
    measure: Box<dyn Measure>,
}

impl StrategyBase {
    pub fn new(budget: f64, oracle: Box<dyn Oracle>, measure: Box<dyn Measure>) -> Result<Self> {
        if !budget.is_finite() || !(0.0..=1.0).contains(&budget) {
            return Err(Error::config("the budget should be a float between [0,1]"));
        }
        Ok(Self {
            budget,
            oracle,
            measure,
        })
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn oracle(&self) -> &dyn Oracle {
        self.oracle.as_ref()
    }

    pub fn oracle_mut(&mut self) -> &mut dyn Oracle {
        self.oracle.as_mut()
    }

    pub fn measure(&self) -> &dyn Measure {
        self.measure.as_ref()
    }
}

/// Pool-based querying policy applied to one batch at a time.
///
/// Implementations differ only in [`below_threshold`]; the selection loop,
/// budget accounting and oracle round-trip are shared.
///
/// [`below_threshold`]: ActiveLearningStrategy::below_threshold
pub trait ActiveLearningStrategy {
    fn name(&self) -> &'static str;

    fn base(&self) -> &StrategyBase;

    fn base_mut(&mut self) -> &mut StrategyBase;

    /// Decides whether the record with uncertainty `score` is queried. May
    /// update internal threshold state on every call.
    fn below_threshold(&mut self, score: f64) -> bool;

    /// Whether class probabilities are needed to make decisions.
    fn requires_probabilities(&self) -> bool {
        true
    }

    fn budget(&self) -> f64 {
        self.base().budget()
    }

    fn oracle(&self) -> &dyn Oracle {
        self.base().oracle()
    }

    /// Picks records of `batch` to query and returns those the oracle
    /// answered.
    ///
    /// Records are visited in batch order; selection stops as soon as the
    /// selected fraction reaches the budget, so later records can be crowded
    /// out once the budget is spent.
    fn select_and_label(
        &mut self,
        batch: &Batch,
        probabilities: Option<&[Vec<f64>]>,
    ) -> Result<Vec<Record>> {
        let scores = match probabilities {
            Some(p) => {
                if p.len() != batch.len() {
                    return Err(Error::data(format!(
                        "the batch ({}) and probability ({}) lengths do not match",
                        batch.len(),
                        p.len()
                    )));
                }
                self.base().measure().calculate(p)
            }
            None if self.requires_probabilities() => {
                return Err(Error::data("please provide the class probabilities"));
            }
            None => vec![f64::NAN; batch.len()],
        };

        self.base_mut().oracle_mut().fit(batch.labels());

        let n = batch.len();
        let budget = self.budget();
        let mut indices = Vec::new();
        if n > 0 {
            for (i, score) in scores.into_iter().enumerate() {
                if indices.len() as f64 / n as f64 >= budget {
                    break;
                }
                if self.below_threshold(score) {
                    indices.push(i);
                }
            }
        }

        let answered = self.base_mut().oracle_mut().predict(&indices);
        let positions: Vec<usize> = answered.iter().map(|(i, _)| *i).collect();
        debug!(
            timepoint = batch.timepoint(),
            requested = indices.len(),
            answered = positions.len(),
            "oracle round-trip"
        );
        Ok(batch.select(&positions))
    }

    /// Read-only view of the oracle counters for `timepoint`.
    fn stats(&self, timepoint: Timepoint) -> ActiveLearningStats {
        let oracle = self.oracle();
        let stats = ActiveLearningStats {
            queried: oracle.queried(),
            answered: oracle.answered(),
            cost: oracle.cost(),
        };
        debug!(
            timepoint,
            queried = stats.queried,
            answered = stats.answered,
            cost = stats.cost,
            "active learning stats"
        );
        stats
    }
}

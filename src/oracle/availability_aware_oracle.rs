use crate::core::Label;
use crate::error::{Error, Result};
use crate::oracle::{Oracle, OracleLedger};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Oracle that is only sometimes available.
///
/// Every requested index (or the whole request when `batch` is set) passes a
/// Bernoulli(`availability`) coin. If fewer than `min(pool, min_labels)`
/// indices survive, the shortfall is backfilled uniformly at random from the
/// rest of the fitted batch, so a training step never starves.
#[derive(Debug)]
pub struct AvailabilityAwareOracle {
    ledger: OracleLedger,
    availability: f64,
    batch: bool,
    min_labels: usize,
    rng: StdRng,
}

impl AvailabilityAwareOracle {
    pub fn new(
        availability: f64,
        batch: bool,
        min_labels: usize,
        cost_per_label: f64,
        seed: u64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&availability) {
            return Err(Error::config(
                "availability out of range. Possible values: [0,1]",
            ));
        }
        Ok(Self {
            ledger: OracleLedger::new(cost_per_label),
            availability,
            batch,
            min_labels,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    #[inline]
    fn is_available(&mut self) -> bool {
        self.rng.random_bool(self.availability)
    }

    fn backfill(&mut self, selected: &mut Vec<usize>) {
        let required = self.ledger.pool_size().min(self.min_labels);
        if selected.len() >= required {
            return;
        }
        let taken: HashSet<usize> = selected.iter().copied().collect();
        let pool: Vec<usize> = (0..self.ledger.pool_size())
            .filter(|i| !taken.contains(i))
            .collect();
        let missing = (required - selected.len()).min(pool.len());
        let picks = rand::seq::index::sample(&mut self.rng, pool.len(), missing);
        selected.extend(picks.into_iter().map(|p| pool[p]));
    }
}

impl Oracle for AvailabilityAwareOracle {
    fn name(&self) -> &'static str {
        "availability_aware_oracle"
    }

    fn ledger(&self) -> &OracleLedger {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut OracleLedger {
        &mut self.ledger
    }

    fn predict(&mut self, indices: &[usize]) -> Vec<(usize, Label)> {
        self.ledger.record_queries(indices.len());

        let mut selected: Vec<usize> = if self.batch {
            if self.is_available() {
                indices.to_vec()
            } else {
                Vec::new()
            }
        } else {
            let mut kept = Vec::with_capacity(indices.len());
            for &i in indices {
                if self.is_available() {
                    kept.push(i);
                }
            }
            kept
        };

        self.backfill(&mut selected);
        self.ledger.lookup(&selected)
    }

    fn availability(&self) -> Option<f64> {
        Some(self.availability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<Label> {
        (0..n).map(|i| format!("l{i}")).collect()
    }

    #[test]
    fn rejects_availability_out_of_range() {
        assert!(matches!(
            AvailabilityAwareOracle::new(1.5, false, 0, 1.0, 1),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            AvailabilityAwareOracle::new(-0.1, false, 0, 1.0, 1),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn unavailable_oracle_backfills_to_min_labels() {
        let mut o = AvailabilityAwareOracle::new(0.0, false, 2, 1.0, 7).unwrap();
        o.fit(labels(5));
        let got = o.predict(&[0, 1, 2]);
        assert_eq!(got.len(), 2);
        let distinct: HashSet<usize> = got.iter().map(|(i, _)| *i).collect();
        assert_eq!(distinct.len(), 2);
        assert!(distinct.iter().all(|i| *i < 5));
        for (i, l) in &got {
            assert_eq!(l, &format!("l{i}"));
        }
        assert_eq!(o.queried(), 3);
        assert_eq!(o.answered(), 2);
    }

    #[test]
    fn backfill_draws_from_the_whole_batch_even_without_requests() {
        let mut o = AvailabilityAwareOracle::new(0.0, true, 2, 1.0, 11).unwrap();
        o.fit(labels(5));
        let got = o.predict(&[]);
        assert_eq!(got.len(), 2);
        assert_eq!(o.queried(), 0);
        assert_eq!(o.cost(), 0.0);
    }

    #[test]
    fn backfill_stops_when_pool_is_exhausted() {
        let mut o = AvailabilityAwareOracle::new(0.0, false, 10, 1.0, 3).unwrap();
        o.fit(labels(3));
        let got = o.predict(&[0]);
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn fully_available_oracle_answers_every_request() {
        let mut o = AvailabilityAwareOracle::new(1.0, false, 0, 1.0, 5).unwrap();
        o.fit(labels(6));
        let got = o.predict(&[1, 3, 5]);
        let idx: Vec<usize> = got.iter().map(|(i, _)| *i).collect();
        assert_eq!(idx, vec![1, 3, 5]);
    }

    #[test]
    fn batch_mode_answers_all_or_nothing() {
        let mut o = AvailabilityAwareOracle::new(0.5, true, 0, 1.0, 99).unwrap();
        for _ in 0..20 {
            o.fit(labels(8));
            let got = o.predict(&[0, 2, 4, 6]);
            assert!(got.is_empty() || got.len() == 4);
        }
    }

    #[test]
    fn same_seed_replays_the_same_answers() {
        let run = |seed| {
            let mut o = AvailabilityAwareOracle::new(0.3, false, 1, 1.0, seed).unwrap();
            o.fit(labels(50));
            o.predict(&(0..50).collect::<Vec<_>>())
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn cost_counts_requested_not_answered() {
        let mut o = AvailabilityAwareOracle::new(0.0, false, 0, 2.0, 1).unwrap();
        o.fit(labels(4));
        o.predict(&[0, 1, 2, 3]);
        o.fit(labels(4));
        o.predict(&[0]);
        assert!((o.cost() - 10.0).abs() < 1e-12);
        assert_eq!(o.answered(), 0);
    }
}

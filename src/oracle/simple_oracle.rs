use crate::core::Label;
use crate::oracle::{Oracle, OracleLedger};

/// Oracle that answers every request.
#[derive(Debug, Clone, Default)]
pub struct SimpleOracle {
    ledger: OracleLedger,
}

impl SimpleOracle {
    pub fn new(cost_per_label: f64) -> Self {
        Self {
            ledger: OracleLedger::new(cost_per_label),
        }
    }
}

impl Oracle for SimpleOracle {
    fn name(&self) -> &'static str {
        "simple_oracle"
    }

    fn ledger(&self) -> &OracleLedger {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut OracleLedger {
        &mut self.ledger
    }

    fn predict(&mut self, indices: &[usize]) -> Vec<(usize, Label)> {
        self.ledger.record_queries(indices.len());
        self.ledger.lookup(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<Label> {
        (0..n).map(|i| format!("c{}", i % 2)).collect()
    }

    #[test]
    fn answers_everything_requested() {
        let mut o = SimpleOracle::default();
        o.fit(labels(4));
        let got = o.predict(&[3, 0]);
        assert_eq!(got, vec![(3, "c1".to_string()), (0, "c0".to_string())]);
        assert_eq!(o.queried(), 2);
        assert_eq!(o.answered(), 2);
    }

    #[test]
    fn cost_adds_up_over_calls() {
        let mut o = SimpleOracle::new(2.5);
        let requests: [&[usize]; 3] = [&[0, 1], &[], &[0, 1, 2]];
        for r in requests {
            o.fit(labels(3));
            o.predict(r);
        }
        assert_eq!(o.ledger().total_queried(), 5);
        assert!((o.cost() - 12.5).abs() < 1e-12);
        assert_eq!(o.queried(), 3);
    }

    #[test]
    fn resumed_ledger_keeps_accumulating_cost() {
        let mut o = SimpleOracle::new(2.0);
        o.ledger_mut().resume(4);
        o.fit(labels(3));
        o.predict(&[0, 2]);
        assert_eq!(o.ledger().total_queried(), 6);
        assert_eq!(o.cost(), 12.0);
        assert_eq!(o.queried(), 2);
    }
}

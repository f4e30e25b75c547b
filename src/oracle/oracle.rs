use crate::core::Label;

/// Ground-truth lookup and counters shared by every oracle.
///
/// `queried` and `answered` describe the last call only; `total_queried`
/// accumulates over the lifetime of the stream and drives the cost.
#[derive(Debug, Clone)]
pub struct OracleLedger {
    labels: Vec<Label>,
    cost_per_label: f64,
    queried: usize,
    answered: usize,
    total_queried: usize,
}

impl OracleLedger {
    pub fn new(cost_per_label: f64) -> Self {
        Self {
            labels: Vec::new(),
            cost_per_label,
            queried: 0,
            answered: 0,
            total_queried: 0,
        }
    }

    pub fn fit(&mut self, labels: Vec<Label>) {
        self.labels = labels;
    }

    pub fn pool_size(&self) -> usize {
        self.labels.len()
    }

    /// Continues from a lifetime query count saved by an earlier run.
    pub fn resume(&mut self, total_queried: usize) {
        self.total_queried = total_queried;
    }

    pub fn record_queries(&mut self, count: usize) {
        self.queried = count;
        self.total_queried += count;
    }

    /// Answers `indices` from the fitted ground truth. Indices outside the
    /// fitted batch are dropped.
    pub fn lookup(&mut self, indices: &[usize]) -> Vec<(usize, Label)> {
        let answers: Vec<(usize, Label)> = indices
            .iter()
            .filter_map(|&i| self.labels.get(i).map(|l| (i, l.clone())))
            .collect();
        self.answered = answers.len();
        answers
    }

    pub fn cost(&self) -> f64 {
        self.cost_per_label * self.total_queried as f64
    }

    pub fn queried(&self) -> usize {
        self.queried
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    pub fn total_queried(&self) -> usize {
        self.total_queried
    }

    pub fn cost_per_label(&self) -> f64 {
        self.cost_per_label
    }
}

impl Default for OracleLedger {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Simulated labelling service.
///
/// `fit` only refreshes the ground truth of the batch about to be queried;
/// callers must request indices of that batch only.
pub trait Oracle {
    fn name(&self) -> &'static str;

    fn ledger(&self) -> &OracleLedger;

    fn ledger_mut(&mut self) -> &mut OracleLedger;

    fn fit(&mut self, labels: Vec<Label>) {
        self.ledger_mut().fit(labels);
    }

    /// Requests labels for `indices`; returns the `(index, label)` pairs that
    /// were actually answered.
    fn predict(&mut self, indices: &[usize]) -> Vec<(usize, Label)>;

    fn cost(&self) -> f64 {
        self.ledger().cost()
    }

    fn queried(&self) -> usize {
        self.ledger().queried()
    }

    fn answered(&self) -> usize {
        self.ledger().answered()
    }

    /// Availability in `[0, 1]` for oracles that model it.
    fn availability(&self) -> Option<f64> {
        None
    }
}

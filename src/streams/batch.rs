use crate::core::{Label, Record};

/// Ordinal index of one arrival batch. Strictly increasing along the stream.
pub type Timepoint = u64;

/// Immutable set of records that arrived together at one timepoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    timepoint: Timepoint,
    records: Vec<Record>,
}

impl Batch {
    pub fn new(timepoint: Timepoint, records: Vec<Record>) -> Self {
        Self { timepoint, records }
    }

    pub fn timepoint(&self) -> Timepoint {
        self.timepoint
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn labels(&self) -> Vec<Label> {
        self.records.iter().map(|r| r.label.clone()).collect()
    }

    /// Copies the records at `indices`, preserving the order of `indices`.
    /// Out-of-range indices are skipped.
    pub fn select(&self, indices: &[usize]) -> Vec<Record> {
        indices
            .iter()
            .filter_map(|&i| self.records.get(i).cloned())
            .collect()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

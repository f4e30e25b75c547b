use crate::core::Record;
use crate::streams::{Batch, Timepoint};

/// One single-feature numeric record per label; the feature is the
/// record's position.
pub fn records_with_labels(labels: &[&str]) -> Vec<Record> {
    labels
        .iter()
        .enumerate()
        .map(|(i, l)| Record::numeric(vec![i as f64], *l))
        .collect()
}

pub fn batch_of(timepoint: Timepoint, labels: &[&str]) -> Batch {
    Batch::new(timepoint, records_with_labels(labels))
}

/// `size` records alternating between labels `a` and `b`.
pub fn numbered_batch(timepoint: Timepoint, size: usize) -> Batch {
    let labels: Vec<&str> = (0..size).map(|i| if i % 2 == 0 { "a" } else { "b" }).collect();
    batch_of(timepoint, &labels)
}

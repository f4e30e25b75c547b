mod records;

pub use records::{batch_of, numbered_batch, records_with_labels};

mod batch;
mod summary;

pub use batch::{Batch, Timepoint};
pub use summary::{Summary, SummaryRow};

use crate::core::{Payload, Record};
use crate::error::{Error, Result};

/// Turns record payloads into the numeric matrix the classifier consumes.
///
/// `transform` must be idempotent: repeated calls on the same records give
/// the same matrix.
pub trait FeaturePipeline {
    fn name(&self) -> &'static str;

    /// Learns whatever state the transform needs from `records`, then
    /// transforms them.
    fn fit_transform(&mut self, records: &[Record]) -> Result<Vec<Vec<f64>>>;

    fn transform(&self, records: &[Record]) -> Result<Vec<Vec<f64>>>;

    fn is_fitted(&self) -> bool;
}

/// Numeric payloads of `records`; text payloads are rejected.
pub(crate) fn numeric_rows(records: &[Record]) -> Result<Vec<Vec<f64>>> {
    records
        .iter()
        .map(|r| match &r.features {
            Payload::Numeric(values) => Ok(values.clone()),
            Payload::Text(_) => Err(Error::data(
                "text payloads need a vectorizing pipeline such as hashing-vectorizer",
            )),
        })
        .collect()
}

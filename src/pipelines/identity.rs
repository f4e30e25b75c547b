use crate::core::Record;
use crate::error::Result;
use crate::pipelines::FeaturePipeline;
use crate::pipelines::feature_pipeline::numeric_rows;

/// Passes numeric payloads through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPipeline;

impl FeaturePipeline for IdentityPipeline {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn fit_transform(&mut self, records: &[Record]) -> Result<Vec<Vec<f64>>> {
        numeric_rows(records)
    }

    fn transform(&self, records: &[Record]) -> Result<Vec<Vec<f64>>> {
        numeric_rows(records)
    }

    fn is_fitted(&self) -> bool {
        true
    }
}

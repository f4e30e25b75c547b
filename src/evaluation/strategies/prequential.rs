use crate::classifiers::Classifier;
use crate::error::Result;
use crate::evaluation::strategies::evaluate_records;
use crate::evaluation::{EvaluationCriteria, EvaluationStrategy, Measurement};
use crate::pipelines::FeaturePipeline;
use crate::streams::Batch;

/// Test-then-train: every batch is scored before it is used for training.
#[derive(Debug, Clone, Default)]
pub struct Prequential {
    criteria: EvaluationCriteria,
}

impl Prequential {
    pub fn new(criteria: EvaluationCriteria) -> Self {
        Self { criteria }
    }
}

impl EvaluationStrategy for Prequential {
    fn name(&self) -> &'static str {
        "prequential_evaluation"
    }

    fn criteria(&self) -> &EvaluationCriteria {
        &self.criteria
    }

    fn evaluate(
        &self,
        batch: &Batch,
        pipeline: &dyn FeaturePipeline,
        classifier: &dyn Classifier,
    ) -> Result<Vec<Measurement>> {
        evaluate_records(batch.records(), pipeline, classifier, &self.criteria)
    }
}

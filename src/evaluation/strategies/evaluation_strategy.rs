use crate::classifiers::Classifier;
use crate::core::{Label, Record};
use crate::error::{Error, Result};
use crate::evaluation::{EvaluationCriteria, Measurement};
use crate::pipelines::FeaturePipeline;
use crate::streams::Batch;

/// Scores the current model for one timepoint.
pub trait EvaluationStrategy {
    fn name(&self) -> &'static str;

    fn criteria(&self) -> &EvaluationCriteria;

    /// Evaluates the already fitted `pipeline` and `classifier`. `batch` is
    /// the incoming timepoint, which implementations may ignore.
    fn evaluate(
        &self,
        batch: &Batch,
        pipeline: &dyn FeaturePipeline,
        classifier: &dyn Classifier,
    ) -> Result<Vec<Measurement>>;
}

/// Shared evaluation path: transform, predict, then score against the true
/// labels of `records`.
pub fn evaluate_records(
    records: &[Record],
    pipeline: &dyn FeaturePipeline,
    classifier: &dyn Classifier,
    criteria: &EvaluationCriteria,
) -> Result<Vec<Measurement>> {
    if !pipeline.is_fitted() {
        return Err(Error::NotFitted("feature pipeline"));
    }
    if !classifier.is_fitted() {
        return Err(Error::NotFitted("classifier"));
    }
    if records.is_empty() {
        return Err(Error::data("the test data is empty"));
    }

    let features = pipeline.transform(records)?;
    let y_pred = classifier.predict(&features)?;
    if y_pred.len() != records.len() {
        return Err(Error::data(format!(
            "{} predictions for {} records",
            y_pred.len(),
            records.len()
        )));
    }
    let probabilities = if criteria.log_loss && classifier.supports_probability() {
        classifier.predict_probability(&features)?
    } else {
        None
    };

    let y_true: Vec<Label> = records.iter().map(|r| r.label.clone()).collect();
    Ok(criteria.evaluate(
        &y_true,
        &y_pred,
        probabilities.as_deref(),
        classifier.classes(),
    ))
}

use crate::classifiers::Classifier;
use crate::core::Record;
use crate::error::{Error, Result};
use crate::evaluation::strategies::evaluate_records;
use crate::evaluation::{EvaluationCriteria, EvaluationStrategy, Measurement};
use crate::pipelines::FeaturePipeline;
use crate::streams::Batch;

/// Scores every timepoint against one fixed held-out set, ignoring the
/// incoming batch.
#[derive(Debug, Clone)]
pub struct HoldOut {
    test_data: Vec<Record>,
    criteria: EvaluationCriteria,
}

impl HoldOut {
    pub fn new(test_data: Vec<Record>, criteria: EvaluationCriteria) -> Result<Self> {
        if test_data.is_empty() {
            return Err(Error::config("the held-out test data must not be empty"));
        }
        Ok(Self {
            test_data,
            criteria,
        })
    }

    pub fn test_data(&self) -> &[Record] {
        &self.test_data
    }
}

impl EvaluationStrategy for HoldOut {
    fn name(&self) -> &'static str {
        "hold_out_evaluation"
    }

    fn criteria(&self) -> &EvaluationCriteria {
        &self.criteria
    }

    fn evaluate(
        &self,
        _batch: &Batch,
        pipeline: &dyn FeaturePipeline,
        classifier: &dyn Classifier,
    ) -> Result<Vec<Measurement>> {
        evaluate_records(&self.test_data, pipeline, classifier, &self.criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::IdentityPipeline;
    use crate::testing::dummies::{batch_of, records_with_labels};
    use crate::testing::stubs::ScriptedClassifier;

    #[test]
    fn ignores_the_incoming_batch() {
        let (mut clf, _) = ScriptedClassifier::new();
        clf.fit(&[vec![0.0]], &["a".to_string()]).unwrap();

        let eval = HoldOut::new(records_with_labels(&["a", "b"]), Default::default()).unwrap();
        let on_a = eval
            .evaluate(&batch_of(1, &["a", "a"]), &IdentityPipeline, &clf)
            .unwrap();
        let on_b = eval
            .evaluate(&batch_of(2, &["b", "b", "b"]), &IdentityPipeline, &clf)
            .unwrap();
        let accuracy = |m: &[Measurement]| m.iter().find(|x| x.name == "accuracy").unwrap().value;
        assert_eq!(accuracy(&on_a), 0.5);
        assert_eq!(accuracy(&on_b), 0.5);
    }

    #[test]
    fn empty_hold_out_set_is_rejected() {
        assert!(matches!(
            HoldOut::new(Vec::new(), Default::default()),
            Err(Error::Config(_))
        ));
    }
}

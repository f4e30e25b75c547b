use crate::classifiers::{Classifier, GaussianNaiveBayes};
use crate::pipelines::{FeaturePipeline, HashingVectorizer, IdentityPipeline, StandardScaler};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::{ClassifierChoice, PipelineChoice};

pub fn build_classifier(choice: &ClassifierChoice) -> Result<Box<dyn Classifier>, BuildError> {
    match choice {
        ClassifierChoice::GaussianNaiveBayes(p) => {
            if !p.var_smoothing.is_finite() || p.var_smoothing < 0.0 {
                return Err(BuildError::InvalidParameter(
                    "var_smoothing must be a non-negative number".into(),
                ));
            }
            Ok(Box::new(GaussianNaiveBayes::new(p.var_smoothing)))
        }
    }
}

pub fn build_pipeline(choice: &PipelineChoice) -> Result<Box<dyn FeaturePipeline>, BuildError> {
    match choice {
        PipelineChoice::Identity(_) => Ok(Box::new(IdentityPipeline)),
        PipelineChoice::StandardScaler(_) => Ok(Box::new(StandardScaler::new())),
        PipelineChoice::HashingVectorizer(p) => Ok(Box::new(HashingVectorizer::new(p.n_features)?)),
    }
}

mod classifier;
pub mod naive_bayes;

pub use classifier::Classifier;
pub use naive_bayes::{GaussianEstimator, GaussianNaiveBayes};

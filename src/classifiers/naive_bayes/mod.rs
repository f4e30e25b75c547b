mod gaussian_estimator;
mod gaussian_naive_bayes;

pub use gaussian_estimator::GaussianEstimator;
pub use gaussian_naive_bayes::GaussianNaiveBayes;

mod feature_pipeline;
mod hashing_vectorizer;
mod identity;
mod standard_scaler;

pub use feature_pipeline::FeaturePipeline;
pub use hashing_vectorizer::HashingVectorizer;
pub use identity::IdentityPipeline;
pub use standard_scaler::StandardScaler;

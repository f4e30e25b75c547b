use crate::ui::types::choices::{NoParams, UIChoice, params_of};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_var_smoothing() -> f64 {
    1e-9
}

fn default_n_features() -> usize {
    1024
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(ClassifierKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum ClassifierChoice {
    #[strum_discriminants(strum(
        message = "Gaussian Naive Bayes",
        detailed_message = "Per-class Gaussian likelihoods assuming feature independence."
    ))]
    GaussianNaiveBayes(GaussianNaiveBayesParams),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GaussianNaiveBayesParams {
    #[serde(default = "default_var_smoothing")]
    #[schemars(
        title = "Variance smoothing",
        description = "Share of the largest feature variance added to every variance.",
        default = "default_var_smoothing",
        range(min = 0.0)
    )]
    pub var_smoothing: f64,
}

impl Default for GaussianNaiveBayesParams {
    fn default() -> Self {
        Self {
            var_smoothing: default_var_smoothing(),
        }
    }
}

impl Default for ClassifierChoice {
    fn default() -> Self {
        ClassifierChoice::GaussianNaiveBayes(GaussianNaiveBayesParams::default())
    }
}

impl UIChoice for ClassifierChoice {
    type Kind = ClassifierKind;

    fn schema() -> Schema {
        schema_for!(ClassifierChoice)
    }

    fn label() -> &'static str {
        "Classifiers:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            ClassifierKind::GaussianNaiveBayes => params_of(GaussianNaiveBayesParams::default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(PipelineKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum PipelineChoice {
    #[strum_discriminants(strum(
        message = "Identity",
        detailed_message = "Passes numeric features through unchanged."
    ))]
    Identity(NoParams),

    #[strum_discriminants(strum(
        message = "Standard Scaler",
        detailed_message = "Centres numeric features and scales them to unit variance."
    ))]
    StandardScaler(NoParams),

    #[strum_discriminants(strum(
        message = "Hashing Vectorizer",
        detailed_message = "Hashes the tokens of text records into a fixed-width vector."
    ))]
    HashingVectorizer(HashingVectorizerParams),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HashingVectorizerParams {
    #[serde(default = "default_n_features")]
    #[schemars(
        title = "Features",
        description = "Width of the hashed feature vector.",
        default = "default_n_features",
        range(min = 1)
    )]
    pub n_features: usize,
}

impl Default for HashingVectorizerParams {
    fn default() -> Self {
        Self {
            n_features: default_n_features(),
        }
    }
}

impl Default for PipelineChoice {
    fn default() -> Self {
        PipelineChoice::Identity(NoParams::default())
    }
}

impl UIChoice for PipelineChoice {
    type Kind = PipelineKind;

    fn schema() -> Schema {
        schema_for!(PipelineChoice)
    }

    fn label() -> &'static str {
        "Feature pipelines:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            PipelineKind::Identity | PipelineKind::StandardScaler => params_of(NoParams::default()),
            PipelineKind::HashingVectorizer => params_of(HashingVectorizerParams::default()),
        }
    }
}

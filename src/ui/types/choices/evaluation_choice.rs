use crate::evaluation::EvaluationCriteria;
use crate::ui::types::choices::{UIChoice, params_of};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(EvaluationKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum EvaluationChoice {
    #[strum_discriminants(strum(
        message = "Prequential",
        detailed_message = "Tests the model on each incoming batch before training on it."
    ))]
    Prequential(CriteriaParams),

    #[strum_discriminants(strum(
        message = "Hold-out",
        detailed_message = "Tests the model on a fixed data set at every timepoint."
    ))]
    HoldOut(HoldOutParams),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CriteriaParams {
    #[serde(default = "default_true")]
    #[schemars(title = "Accuracy", default = "default_true")]
    pub accuracy: bool,

    #[serde(default = "default_true")]
    #[schemars(
        title = "Precision",
        description = "Support-weighted precision.",
        default = "default_true"
    )]
    pub precision: bool,

    #[serde(default = "default_true")]
    #[schemars(
        title = "Recall",
        description = "Support-weighted recall.",
        default = "default_true"
    )]
    pub recall: bool,

    #[serde(default = "default_true")]
    #[schemars(
        title = "F1",
        description = "Support-weighted F1 score.",
        default = "default_true"
    )]
    pub f1: bool,

    #[serde(default = "default_true")]
    #[schemars(
        title = "Log loss",
        description = "Needs a classifier that outputs probabilities.",
        default = "default_true"
    )]
    pub log_loss: bool,

    #[serde(default = "default_true")]
    #[schemars(
        title = "Per class",
        description = "Track precision, recall, F1 and support for every class?",
        default = "default_true"
    )]
    pub class_wise: bool,
}

impl Default for CriteriaParams {
    fn default() -> Self {
        Self {
            accuracy: true,
            precision: true,
            recall: true,
            f1: true,
            log_loss: true,
            class_wise: true,
        }
    }
}

impl From<&CriteriaParams> for EvaluationCriteria {
    fn from(p: &CriteriaParams) -> Self {
        EvaluationCriteria {
            accuracy: p.accuracy,
            precision: p.precision,
            recall: p.recall,
            f1: p.f1,
            log_loss: p.log_loss,
            class_wise: p.class_wise,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
pub struct HoldOutParams {
    #[schemars(
        title = "Test data",
        description = "Batch file with the held-out records, relative to the manifest directory."
    )]
    pub path: PathBuf,

    #[serde(flatten)]
    pub criteria: CriteriaParams,
}

impl Default for EvaluationChoice {
    fn default() -> Self {
        EvaluationChoice::Prequential(CriteriaParams::default())
    }
}

impl UIChoice for EvaluationChoice {
    type Kind = EvaluationKind;

    fn schema() -> Schema {
        schema_for!(EvaluationChoice)
    }

    fn label() -> &'static str {
        "Evaluation strategies:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            EvaluationKind::Prequential => params_of(CriteriaParams::default()),
            EvaluationKind::HoldOut => params_of(HoldOutParams::default()),
        }
    }
}

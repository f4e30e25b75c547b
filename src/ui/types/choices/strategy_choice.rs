use crate::ui::types::choices::{NoParams, UIChoice, params_of};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_threshold() -> f64 {
    0.9
}

fn default_step() -> f64 {
    0.01
}

fn default_variance() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(StrategyKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum StrategyChoice {
    #[strum_discriminants(strum(
        message = "Random Sampling",
        detailed_message = "Queries each record with probability equal to the budget."
    ))]
    Random(NoParams),

    #[strum_discriminants(strum(
        message = "Fixed Uncertainty",
        detailed_message = "Queries records whose uncertainty measure is below a fixed threshold."
    ))]
    FixedUncertainty(FixedUncertaintyParams),

    #[strum_discriminants(strum(
        message = "Variable Uncertainty",
        detailed_message = "Adapts the threshold after every record to track the budget."
    ))]
    VariableUncertainty(VariableUncertaintyParams),

    #[strum_discriminants(strum(
        message = "Randomized Variable Uncertainty",
        detailed_message = "Variable uncertainty with a Gaussian jitter on the threshold."
    ))]
    RandomizedVariableUncertainty(RandomizedVariableUncertaintyParams),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FixedUncertaintyParams {
    #[serde(default = "default_threshold")]
    #[schemars(
        title = "Threshold",
        description = "Records scoring below this value are queried.",
        default = "default_threshold"
    )]
    pub threshold: f64,
}

impl Default for FixedUncertaintyParams {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct VariableUncertaintyParams {
    #[serde(default = "default_step")]
    #[schemars(
        title = "Step",
        description = "Relative threshold adjustment per record (0, 1].",
        default = "default_step",
        range(min = 0.0, max = 1.0)
    )]
    pub step: f64,
}

impl Default for VariableUncertaintyParams {
    fn default() -> Self {
        Self {
            step: default_step(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RandomizedVariableUncertaintyParams {
    #[serde(default = "default_step")]
    #[schemars(
        title = "Step",
        description = "Relative threshold adjustment per record (0, 1].",
        default = "default_step",
        range(min = 0.0, max = 1.0)
    )]
    pub step: f64,

    #[serde(default = "default_variance")]
    #[schemars(
        title = "Variance",
        description = "Variance of the N(1, variance) multiplier applied to the threshold.",
        default = "default_variance"
    )]
    pub variance: f64,
}

impl Default for RandomizedVariableUncertaintyParams {
    fn default() -> Self {
        Self {
            step: default_step(),
            variance: default_variance(),
        }
    }
}

impl UIChoice for StrategyChoice {
    type Kind = StrategyKind;

    fn schema() -> Schema {
        schema_for!(StrategyChoice)
    }

    fn label() -> &'static str {
        "Active learning strategies:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            StrategyKind::Random => params_of(NoParams::default()),
            StrategyKind::FixedUncertainty => params_of(FixedUncertaintyParams::default()),
            StrategyKind::VariableUncertainty => params_of(VariableUncertaintyParams::default()),
            StrategyKind::RandomizedVariableUncertainty => {
                params_of(RandomizedVariableUncertaintyParams::default())
            }
        }
    }
}

use crate::ui::types::choices::{NoParams, UIChoice, params_of};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_partitions() -> usize {
    1
}

fn default_records() -> usize {
    1000
}

fn default_min_count() -> usize {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(WindowChoiceKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum WindowChoice {
    #[strum_discriminants(strum(
        message = "No Window",
        detailed_message = "Keeps every labelled record seen so far."
    ))]
    None(NoParams),

    #[strum_discriminants(strum(
        message = "Sliding Window",
        detailed_message = "Keeps the most recent timepoints, optionally retaining evicted records per class."
    ))]
    Sliding(SlidingParams),

    #[strum_discriminants(strum(
        message = "Fixed-length Window",
        detailed_message = "Keeps the most recent records."
    ))]
    FixedLength(FixedLengthParams),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SlidingParams {
    #[serde(default = "default_partitions")]
    #[schemars(
        title = "Size",
        description = "Number of timepoints kept.",
        default = "default_partitions",
        range(min = 1)
    )]
    pub size: usize,

    #[serde(default)]
    #[schemars(
        title = "Forgetting",
        description = "Retains part of the evicted records instead of dropping them."
    )]
    pub forgetting: Option<ForgettingChoice>,
}

impl Default for SlidingParams {
    fn default() -> Self {
        Self {
            size: default_partitions(),
            forgetting: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FixedLengthParams {
    #[serde(default = "default_records")]
    #[schemars(
        title = "Size",
        description = "Number of records kept.",
        default = "default_records",
        range(min = 1)
    )]
    pub size: usize,
}

impl Default for FixedLengthParams {
    fn default() -> Self {
        Self {
            size: default_records(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(ForgettingKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum ForgettingChoice {
    #[strum_discriminants(strum(
        message = "Per-class Threshold",
        detailed_message = "Keeps at least the configured number of records of each class."
    ))]
    Threshold(ThresholdParams),

    #[strum_discriminants(strum(
        message = "Fixed Threshold",
        detailed_message = "Keeps at least the same number of records of every class."
    ))]
    FixedThreshold(FixedThresholdParams),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
pub struct ThresholdParams {
    #[serde(default)]
    #[schemars(
        title = "Per-class minimum",
        description = "Minimum number of records kept for each listed class."
    )]
    pub per_class: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FixedThresholdParams {
    #[serde(default = "default_min_count")]
    #[schemars(
        title = "Minimum per class",
        description = "Minimum number of records kept for every class.",
        default = "default_min_count"
    )]
    pub min_count: usize,
}

impl Default for FixedThresholdParams {
    fn default() -> Self {
        Self {
            min_count: default_min_count(),
        }
    }
}

impl Default for WindowChoice {
    fn default() -> Self {
        WindowChoice::None(NoParams::default())
    }
}

impl UIChoice for WindowChoice {
    type Kind = WindowChoiceKind;

    fn schema() -> Schema {
        schema_for!(WindowChoice)
    }

    fn label() -> &'static str {
        "Windows:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            WindowChoiceKind::None => params_of(NoParams::default()),
            WindowChoiceKind::Sliding => params_of(SlidingParams::default()),
            WindowChoiceKind::FixedLength => params_of(FixedLengthParams::default()),
        }
    }
}

impl UIChoice for ForgettingChoice {
    type Kind = ForgettingKind;

    fn schema() -> Schema {
        schema_for!(ForgettingChoice)
    }

    fn label() -> &'static str {
        "Forgetting strategies:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            ForgettingKind::Threshold => params_of(ThresholdParams::default()),
            ForgettingKind::FixedThreshold => params_of(FixedThresholdParams::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sliding_with_nested_forgetting() {
        let c: WindowChoice = serde_json::from_value(json!({
            "type": "sliding",
            "params": {
                "size": 3,
                "forgetting": { "type": "threshold", "params": { "per_class": { "a": 2 } } }
            }
        }))
        .unwrap();
        let WindowChoice::Sliding(p) = c else {
            panic!("expected a sliding window");
        };
        assert_eq!(p.size, 3);
        let Some(ForgettingChoice::Threshold(t)) = p.forgetting else {
            panic!("expected threshold forgetting");
        };
        assert_eq!(t.per_class.get("a"), Some(&2));
    }

    #[test]
    fn sliding_without_forgetting_defaults_to_none() {
        let c: WindowChoice =
            serde_json::from_value(json!({ "type": "sliding", "params": { "size": 2 } })).unwrap();
        assert!(matches!(c, WindowChoice::Sliding(SlidingParams { size: 2, forgetting: None })));
    }

    #[test]
    fn default_is_unbounded() {
        let v = serde_json::to_value(WindowChoice::default()).unwrap();
        assert_eq!(v["type"], "none");
    }

    #[test]
    fn every_forgetting_kind_has_defaults() {
        assert_eq!(ForgettingChoice::defaults().unwrap().len(), 2);
    }
}

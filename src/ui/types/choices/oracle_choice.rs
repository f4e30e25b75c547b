use crate::ui::types::choices::{UIChoice, params_of};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_cost() -> f64 {
    1.0
}

fn default_availability() -> f64 {
    1.0
}

fn default_false() -> bool {
    false
}

fn default_min_labels() -> usize {
    0
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(OracleKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum OracleChoice {
    #[strum_discriminants(strum(
        message = "Simple Oracle",
        detailed_message = "Answers every query with the true label."
    ))]
    Simple(SimpleOracleParams),

    #[strum_discriminants(strum(
        message = "Availability-aware Oracle",
        detailed_message = "Answers each query with a fixed probability, backfilling up to a minimum."
    ))]
    AvailabilityAware(AvailabilityAwareParams),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SimpleOracleParams {
    #[serde(default = "default_cost")]
    #[schemars(
        title = "Cost per label",
        description = "Cost charged for every queried record.",
        default = "default_cost"
    )]
    pub cost_per_label: f64,
}

impl Default for SimpleOracleParams {
    fn default() -> Self {
        Self {
            cost_per_label: default_cost(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AvailabilityAwareParams {
    #[serde(default = "default_availability")]
    #[schemars(
        title = "Availability",
        description = "Probability that a query is answered.",
        default = "default_availability",
        range(min = 0.0, max = 1.0)
    )]
    pub availability: f64,

    #[serde(default = "default_false")]
    #[schemars(
        title = "Batch availability",
        description = "Draw one coin for the whole request instead of one per record?",
        default = "default_false"
    )]
    pub batch: bool,

    #[serde(default = "default_min_labels")]
    #[schemars(
        title = "Minimum labels",
        description = "Answers are backfilled at random up to this many per request.",
        default = "default_min_labels"
    )]
    pub min_labels: usize,

    #[serde(default = "default_cost")]
    #[schemars(
        title = "Cost per label",
        description = "Cost charged for every queried record.",
        default = "default_cost"
    )]
    pub cost_per_label: f64,
}

impl Default for AvailabilityAwareParams {
    fn default() -> Self {
        Self {
            availability: default_availability(),
            batch: default_false(),
            min_labels: default_min_labels(),
            cost_per_label: default_cost(),
        }
    }
}

impl OracleChoice {
    /// Availability that scopes the results directory, if any.
    pub fn availability(&self) -> Option<f64> {
        match self {
            OracleChoice::Simple(_) => None,
            OracleChoice::AvailabilityAware(p) => Some(p.availability),
        }
    }
}

impl Default for OracleChoice {
    fn default() -> Self {
        OracleChoice::Simple(SimpleOracleParams::default())
    }
}

impl UIChoice for OracleChoice {
    type Kind = OracleKind;

    fn schema() -> Schema {
        schema_for!(OracleChoice)
    }

    fn label() -> &'static str {
        "Oracles:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            OracleKind::Simple => params_of(SimpleOracleParams::default()),
            OracleKind::AvailabilityAware => params_of(AvailabilityAwareParams::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn availability_aware_defaults_apply() {
        let c: OracleChoice = serde_json::from_value(json!({
            "type": "availability-aware",
            "params": { "availability": 0.25 }
        }))
        .unwrap();
        match &c {
            OracleChoice::AvailabilityAware(p) => {
                assert_eq!(p.availability, 0.25);
                assert!(!p.batch);
                assert_eq!(p.min_labels, 0);
                assert_eq!(p.cost_per_label, 1.0);
            }
            other => panic!("unexpected choice {other:?}"),
        }
        assert_eq!(c.availability(), Some(0.25));
    }

    #[test]
    fn simple_oracle_has_no_availability() {
        assert_eq!(OracleChoice::default().availability(), None);
    }

    #[test]
    fn default_params_round_trip_through_from_parts() {
        let v = OracleChoice::default_params(OracleKind::AvailabilityAware);
        let rebuilt = OracleChoice::from_parts(OracleKind::AvailabilityAware, v).unwrap();
        assert!(matches!(rebuilt, OracleChoice::AvailabilityAware(p) if p == AvailabilityAwareParams::default()));
    }
}

use crate::active_learning::measures::{Entropy, MaxMargin, MaxPosterior};
use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Uncertainty score computed from predicted class probabilities.
///
/// Scores are compared against a threshold owned by the querying strategy;
/// [`check`](Measure::check) answers whether a record is uncertain enough to
/// be worth a label.
pub trait Measure {
    fn name(&self) -> &'static str;

    /// One score per row of `probabilities` (`n_records x n_classes`).
    fn calculate(&self, probabilities: &[Vec<f64>]) -> Vec<f64>;

    /// `true` when `score` is below the confidence required by `threshold`.
    fn check(&self, score: f64, threshold: f64) -> bool;

    /// Score value that stands for maximal uncertainty.
    fn max_value(&self) -> f64 {
        1.0
    }

    fn increase_threshold(&self, threshold: f64, step: f64) -> f64 {
        threshold * (1.0 + step)
    }

    fn decrease_threshold(&self, threshold: f64, step: f64) -> f64 {
        threshold * (1.0 - step)
    }
}

/// Closed set of supported measures, resolvable from their names.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum MeasureKind {
    #[serde(alias = "max_posterior")]
    #[strum(to_string = "least_confident", serialize = "max_posterior")]
    LeastConfident,
    #[strum(to_string = "max_margin")]
    MaxMargin,
    #[default]
    #[strum(to_string = "entropy")]
    Entropy,
}

impl MeasureKind {
    pub fn build(self) -> Box<dyn Measure> {
        match self {
            MeasureKind::LeastConfident => Box::new(MaxPosterior),
            MeasureKind::MaxMargin => Box::new(MaxMargin),
            MeasureKind::Entropy => Box::new(Entropy),
        }
    }
}

/// Resolves a measure by name; unknown names are a configuration error.
pub fn measure_for(name: &str) -> Result<Box<dyn Measure>> {
    MeasureKind::from_str(name)
        .map(MeasureKind::build)
        .map_err(|_| {
            let supported: Vec<&'static str> = MeasureKind::iter().map(Into::into).collect();
            Error::config(format!(
                "the measure '{name}' is not supported. Supported: {}",
                supported.join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_to_their_variants() {
        assert_eq!(measure_for("entropy").unwrap().name(), "entropy");
        assert_eq!(measure_for("max_margin").unwrap().name(), "max_margin");
        assert_eq!(measure_for("least_confident").unwrap().name(), "max_posterior");
        assert_eq!(measure_for("max_posterior").unwrap().name(), "max_posterior");
    }

    #[test]
    fn unknown_name_is_a_configuration_error() {
        let err = measure_for("gini").err().unwrap();
        match err {
            Error::Config(msg) => {
                assert!(msg.contains("gini"));
                assert!(msg.contains("least_confident, max_margin, entropy"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_kind_is_entropy_and_serde_uses_snake_case() {
        assert_eq!(MeasureKind::default(), MeasureKind::Entropy);
        let v = serde_json::to_value(MeasureKind::MaxMargin).unwrap();
        assert_eq!(v, serde_json::json!("max_margin"));
        let k: MeasureKind = serde_json::from_value(serde_json::json!("max_posterior")).unwrap();
        assert_eq!(k, MeasureKind::LeastConfident);
    }

    #[test]
    fn thresholds_move_multiplicatively() {
        let m = Entropy;
        assert!((m.increase_threshold(0.5, 0.1) - 0.55).abs() < 1e-12);
        assert!((m.decrease_threshold(0.5, 0.1) - 0.45).abs() < 1e-12);
        assert_eq!(m.max_value(), 1.0);
    }
}

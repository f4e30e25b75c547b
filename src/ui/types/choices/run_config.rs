use crate::active_learning::MeasureKind;
use crate::ui::types::choices::{
    ClassifierChoice, EvaluationChoice, OracleChoice, PipelineChoice, StrategyChoice, WindowChoice,
};
use anyhow::{Context, Result};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_seed() -> u64 {
    42
}

fn default_budget() -> f64 {
    0.1
}

/// Everything needed to start or resume a run, read from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[schemars(
        title = "Manifest",
        description = "Table with a `timepoint` and a `filename` column. Batch files and results live next to it."
    )]
    pub manifest: PathBuf,

    #[schemars(title = "Target column", description = "Column holding the class label.")]
    pub target_column: String,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", default = "default_seed")]
    pub seed: u64,

    #[serde(default)]
    #[schemars(
        title = "Initial timepoint",
        description = "Last timepoint of the initially labelled data. Defaults to the first one."
    )]
    pub initial_timepoint: Option<u64>,

    #[serde(default)]
    pub pipeline: PipelineChoice,

    #[serde(default)]
    pub classifier: ClassifierChoice,

    #[serde(default)]
    pub window: WindowChoice,

    #[serde(default)]
    pub evaluation: EvaluationChoice,

    #[serde(default)]
    #[schemars(
        title = "Active learning",
        description = "Leave out for a supervised run where every record is labelled."
    )]
    pub active_learning: Option<ActiveLearningConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ActiveLearningConfig {
    #[serde(default = "default_budget")]
    #[schemars(
        title = "Budget",
        description = "Share of records that may be queried (0, 1].",
        default = "default_budget"
    )]
    pub budget: f64,

    #[serde(default)]
    pub measure: MeasureKind,

    #[serde(default)]
    pub oracle: OracleChoice,

    pub strategy: StrategyChoice,
}

impl RunConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn schema() -> Schema {
        schema_for!(RunConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn minimal_config_fills_defaults() {
        let c: RunConfig = serde_json::from_value(json!({
            "manifest": "data/manifest.csv",
            "target_column": "label"
        }))
        .unwrap();
        assert_eq!(c.seed, 42);
        assert!(c.initial_timepoint.is_none());
        assert!(c.active_learning.is_none());
        assert!(matches!(c.window, WindowChoice::None(_)));
        assert!(matches!(c.evaluation, EvaluationChoice::Prequential(_)));
        assert!(matches!(c.pipeline, PipelineChoice::Identity(_)));
    }

    #[test]
    fn active_learning_section_parses() {
        let c: RunConfig = serde_json::from_value(json!({
            "manifest": "m.csv",
            "target_column": "y",
            "active_learning": {
                "budget": 0.3,
                "measure": "max_margin",
                "strategy": { "type": "random", "params": {} }
            }
        }))
        .unwrap();
        let al = c.active_learning.unwrap();
        assert_eq!(al.budget, 0.3);
        assert_eq!(al.measure, MeasureKind::MaxMargin);
        assert!(matches!(al.oracle, OracleChoice::Simple(_)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let r: std::result::Result<RunConfig, _> = serde_json::from_value(json!({
            "manifest": "m.csv",
            "target_column": "y",
            "stream": "sea"
        }));
        assert!(r.is_err());
    }

    #[test]
    fn from_path_reports_invalid_json() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{{ not json").unwrap();
        let err = RunConfig::from_path(f.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn schema_lists_top_level_fields() {
        let v = serde_json::to_value(RunConfig::schema()).unwrap();
        let props = v["properties"].as_object().unwrap();
        for k in ["manifest", "target_column", "window", "active_learning"] {
            assert!(props.contains_key(k), "missing {k}");
        }
    }
}

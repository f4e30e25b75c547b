use crate::active_learning::ActiveLearningStats;
use crate::evaluation::Measurement;
use crate::streams::Timepoint;
use crate::windows::WindowStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wall-clock seconds spent in each phase of a timepoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseTimings {
    pub test: Option<f64>,
    pub sample: Option<f64>,
    pub train: Option<f64>,
}

/// Everything observed while processing one timepoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRow {
    pub timepoint: Timepoint,
    #[serde(with = "crate::utils::serde_nan")]
    pub summary: BTreeMap<String, f64>,
    pub window: WindowStats,
    pub active_learning: Option<ActiveLearningStats>,
    pub time: PhaseTimings,
}

impl StatisticsRow {
    pub fn new(timepoint: Timepoint) -> Self {
        Self {
            timepoint,
            summary: BTreeMap::new(),
            window: WindowStats::default(),
            active_learning: None,
            time: PhaseTimings::default(),
        }
    }

    pub fn record_measurements(&mut self, measurements: Vec<Measurement>) {
        self.summary
            .extend(measurements.into_iter().map(|m| (m.name, m.value)));
    }

    /// Metric value, `NaN` when missing.
    pub fn metric(&self, name: &str) -> f64 {
        self.summary.get(name).copied().unwrap_or(f64::NAN)
    }

    /// Flat `(column, value)` pairs, `NaN` marking an undefined metric.
    pub fn columns(&self) -> Vec<(String, Option<f64>)> {
        let mut out = Vec::new();
        for (k, v) in &self.summary {
            out.push((format!("summary.{k}"), Some(*v)));
        }
        out.push(("window.total".to_string(), Some(self.window.total as f64)));
        for (k, v) in &self.window.per_class {
            out.push((format!("window.{k}"), Some(*v as f64)));
        }
        if let Some(al) = &self.active_learning {
            out.push(("active_learning.queried".into(), Some(al.queried as f64)));
            out.push(("active_learning.answered".into(), Some(al.answered as f64)));
            out.push(("active_learning.cost".into(), Some(al.cost)));
        }
        out.push(("time.test".into(), self.time.test));
        out.push(("time.sample".into(), self.time.sample));
        out.push(("time.train".into(), self.time.train));
        out
    }
}

use crate::core::Label;
use crate::evaluation::StatisticsTable;
use crate::streams::{Summary, Timepoint};
use crate::windows::WindowSnapshot;
use serde::{Deserialize, Serialize};

/// Durable state of a run after its last committed timepoint.
///
/// The model is not part of it: training is recomputed from the window.
/// `labels_queried` is the oracle's lifetime query count, so the cost keeps
/// accumulating across a resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub timepoint: Option<Timepoint>,
    pub classes: Vec<Label>,
    #[serde(default)]
    pub labels_queried: usize,
    pub summary: Summary,
    pub statistics: StatisticsTable,
    pub window: WindowSnapshot,
}

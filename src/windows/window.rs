use crate::core::{Label, Record};
use crate::error::{Error, Result};
use crate::streams::Timepoint;
use crate::windows::ForgettingStrategy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use tracing::debug;

/// Records folded into the window at one timepoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    pub timepoint: Timepoint,
    pub records: Vec<Record>,
}

/// Serializable copy of a window's partitions, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowSnapshot {
    pub partitions: Vec<Partition>,
}

/// Class composition of the window at one timepoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub total: usize,
    pub per_class: BTreeMap<Label, usize>,
}

/// How the window bounds its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Keeps every record ever added.
    Unbounded,
    /// At most `size` timepoint partitions.
    Sliding(usize),
    /// At most `size` records; each record is its own partition.
    FixedLength(usize),
}

/// Training set of the stream, partitioned by the timepoint each record was
/// added at. The oldest partition is evicted first.
pub struct Window {
    kind: WindowKind,
    partitions: Option<VecDeque<Partition>>,
    forgetting: Option<Box<dyn ForgettingStrategy>>,
}

impl Window {
    pub fn unbounded() -> Self {
        Self {
            kind: WindowKind::Unbounded,
            partitions: None,
            forgetting: None,
        }
    }

    pub fn sliding(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::config("the window size should be a positive integer"));
        }
        Ok(Self {
            kind: WindowKind::Sliding(size),
            partitions: None,
            forgetting: None,
        })
    }

    pub fn fixed_length(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::config("the window length should be a positive integer"));
        }
        Ok(Self {
            kind: WindowKind::FixedLength(size),
            partitions: None,
            forgetting: None,
        })
    }

    /// Residue selection applied before the oldest partition is dropped.
    ///
    /// A fixed-length window evicts one record at a time, so any residue
    /// would put it back over its length; that combination is rejected.
    pub fn with_forgetting(mut self, strategy: Box<dyn ForgettingStrategy>) -> Result<Self> {
        if let WindowKind::FixedLength(_) = self.kind {
            return Err(Error::config(format!(
                "forgetting strategy {} cannot be used with a fixed length window",
                strategy.name()
            )));
        }
        self.forgetting = Some(strategy);
        Ok(self)
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            WindowKind::Unbounded => "no_window",
            WindowKind::Sliding(_) => "sliding_window",
            WindowKind::FixedLength(_) => "fixed_length_window",
        }
    }

    pub fn forgetting(&self) -> Option<&dyn ForgettingStrategy> {
        self.forgetting.as_deref()
    }

    pub fn capacity(&self) -> Option<usize> {
        match self.kind {
            WindowKind::Unbounded => None,
            WindowKind::Sliding(n) | WindowKind::FixedLength(n) => Some(n),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.partitions.is_some()
    }

    /// Starts an empty window. Any previous content is discarded.
    pub fn initialize(&mut self) {
        self.partitions = Some(VecDeque::new());
    }

    fn parts(&self) -> Result<&VecDeque<Partition>> {
        self.partitions.as_ref().ok_or(Error::Uninitialized("window"))
    }

    fn parts_mut(&mut self) -> Result<&mut VecDeque<Partition>> {
        self.partitions.as_mut().ok_or(Error::Uninitialized("window"))
    }

    /// Folds `records` into the partition for `timepoint`, evicting first
    /// when the window is full. An empty `records` is a no-op.
    pub fn add(&mut self, timepoint: Timepoint, records: Vec<Record>) -> Result<()> {
        if let Some(last) = self.parts()?.back()
            && timepoint < last.timepoint
        {
            return Err(Error::data(format!(
                "cannot add timepoint {timepoint} after timepoint {}",
                last.timepoint
            )));
        }
        if records.is_empty() {
            return Ok(());
        }

        match self.kind {
            WindowKind::Unbounded => self.push(timepoint, records),
            WindowKind::Sliding(_) => {
                let opens_partition = self
                    .parts()?
                    .back()
                    .is_none_or(|last| last.timepoint != timepoint);
                if opens_partition && self.is_full()? {
                    self.forget(timepoint)?;
                }
                self.push(timepoint, records)
            }
            WindowKind::FixedLength(_) => {
                for record in records {
                    if self.is_full()? {
                        self.forget(timepoint)?;
                    }
                    self.parts_mut()?.push_back(Partition {
                        timepoint,
                        records: vec![record],
                    });
                }
                Ok(())
            }
        }
    }

    fn push(&mut self, timepoint: Timepoint, records: Vec<Record>) -> Result<()> {
        let parts = self.parts_mut()?;
        match parts.back_mut() {
            Some(last) if last.timepoint == timepoint => last.records.extend(records),
            _ => parts.push_back(Partition { timepoint, records }),
        }
        Ok(())
    }

    /// Evicts the oldest partition. Records the forgetting strategy keeps
    /// are carried into the partition for `incoming`.
    pub fn forget(&mut self, incoming: Timepoint) -> Result<()> {
        let parts = self
            .partitions
            .as_mut()
            .ok_or(Error::Uninitialized("window"))?;
        let Some(oldest) = parts.pop_front() else {
            return Ok(());
        };

        let residue = match self.forgetting.as_mut() {
            Some(strategy) => {
                let remaining: Vec<&Record> =
                    parts.iter().flat_map(|p| p.records.iter()).collect();
                strategy.sample_data(&oldest.records, &remaining)
            }
            None => Vec::new(),
        };
        debug!(
            dropped = oldest.timepoint,
            dropped_records = oldest.records.len(),
            kept = residue.len(),
            "window eviction"
        );
        if !residue.is_empty() {
            self.push(incoming, residue)?;
        }
        Ok(())
    }

    /// True when the number of retained partitions reached the capacity.
    pub fn is_full(&self) -> Result<bool> {
        let parts = self.parts()?;
        Ok(self.capacity().is_some_and(|c| parts.len() >= c))
    }

    pub fn len(&self) -> usize {
        self.partitions
            .as_ref()
            .map_or(0, |p| p.iter().map(|p| p.records.len()).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.as_ref().map_or(0, VecDeque::len)
    }

    /// Distinct timepoints present, ascending.
    pub fn timepoints(&self) -> Vec<Timepoint> {
        let mut out: Vec<Timepoint> = self
            .partitions
            .iter()
            .flatten()
            .map(|p| p.timepoint)
            .collect();
        out.dedup();
        out
    }

    /// Every retained record, oldest partition first.
    pub fn records(&self) -> Result<impl Iterator<Item = &Record>> {
        Ok(self.parts()?.iter().flat_map(|p| p.records.iter()))
    }

    /// Sorted distinct labels present in the window.
    pub fn classes(&self) -> Result<Vec<Label>> {
        let mut classes: Vec<Label> = self.records()?.map(|r| r.label.clone()).collect();
        classes.sort();
        classes.dedup();
        Ok(classes)
    }

    /// Counts per class of `classes`; classes absent from the window count 0.
    /// Labels outside `classes` only contribute to the total.
    pub fn stats(&self, classes: &[Label]) -> Result<WindowStats> {
        let mut per_class: BTreeMap<Label, usize> =
            classes.iter().map(|c| (c.clone(), 0)).collect();
        let mut total = 0;
        for record in self.records()? {
            total += 1;
            if let Some(n) = per_class.get_mut(&record.label) {
                *n += 1;
            }
        }
        Ok(WindowStats { total, per_class })
    }

    pub fn snapshot(&self) -> Result<WindowSnapshot> {
        Ok(WindowSnapshot {
            partitions: self.parts()?.iter().cloned().collect(),
        })
    }

    /// Replaces the content with `snapshot`, leaving the kind and forgetting
    /// strategy untouched.
    pub fn restore(&mut self, snapshot: WindowSnapshot) -> Result<()> {
        let mut previous: Option<Timepoint> = None;
        for p in &snapshot.partitions {
            if previous.is_some_and(|t| p.timepoint < t) {
                return Err(Error::data("window partitions are not in timepoint order"));
            }
            previous = Some(p.timepoint);
        }
        if let WindowKind::Sliding(size) = self.kind
            && snapshot.partitions.len() > size
        {
            return Err(Error::data(format!(
                "{} partitions do not fit a window of size {size}",
                snapshot.partitions.len()
            )));
        }
        self.partitions = Some(snapshot.partitions.into());
        Ok(())
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("kind", &self.kind)
            .field("partitions", &self.partition_count())
            .field("records", &self.len())
            .field("forgetting", &self.forgetting.as_ref().map(|s| s.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::records_with_labels;
    use crate::windows::Threshold;

    fn sliding(size: usize) -> Window {
        let mut w = Window::sliding(size).unwrap();
        w.initialize();
        w
    }

    #[test]
    fn sliding_window_drops_the_oldest_partition() {
        let mut w = sliding(3);
        for t in 0..4 {
            w.add(t, records_with_labels(&["a", "b"])).unwrap();
        }
        assert_eq!(w.timepoints(), vec![1, 2, 3]);
        assert_eq!(w.len(), 6);
    }

    #[test]
    fn capacity_holds_after_any_sequence_of_adds() {
        let mut w = sliding(2).with_forgetting(Box::new(Threshold::fixed(5, 3))).unwrap();
        for t in 0..10 {
            let labels: &[&str] = if t % 3 == 0 { &["a", "a", "b"] } else { &["b"] };
            w.add(t, records_with_labels(labels)).unwrap();
            assert!(w.timepoints().len() <= 2);
            assert!(w.partition_count() <= 2);
        }
    }

    #[test]
    fn forgetting_keeps_a_class_floor() {
        let mut w = sliding(2).with_forgetting(Box::new(Threshold::fixed(2, 11))).unwrap();
        w.add(0, records_with_labels(&["a", "a", "a", "b"])).unwrap();
        w.add(1, records_with_labels(&["b", "b"])).unwrap();
        w.add(2, records_with_labels(&["b"])).unwrap();

        let stats = w.stats(&["a".into(), "b".into()]).unwrap();
        assert_eq!(stats.per_class["a"], 2);
        assert_eq!(stats.per_class["b"], 3);
        assert_eq!(w.timepoints(), vec![1, 2]);
    }

    #[test]
    fn empty_additions_do_not_evict() {
        let mut w = sliding(1);
        w.add(0, records_with_labels(&["a"])).unwrap();
        w.add(1, Vec::new()).unwrap();
        assert_eq!(w.timepoints(), vec![0]);
    }

    #[test]
    fn fixed_length_window_counts_records() {
        let mut w = Window::fixed_length(3).unwrap();
        w.initialize();
        w.add(0, records_with_labels(&["a", "b"])).unwrap();
        w.add(1, records_with_labels(&["c", "d"])).unwrap();
        let labels: Vec<&str> = w.records().unwrap().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["b", "c", "d"]);
    }

    #[test]
    fn fixed_length_window_never_exceeds_its_length() {
        let forgetting = Box::new(Threshold::fixed(3, 5));
        let w = Window::fixed_length(4).unwrap().with_forgetting(forgetting);
        assert!(matches!(w, Err(Error::Config(_))));

        let mut w = Window::fixed_length(4).unwrap();
        w.initialize();
        for t in 0..6 {
            w.add(t, records_with_labels(&["a", "a", "b"])).unwrap();
            assert!(w.len() <= 4);
        }
        assert_eq!(w.len(), 4);
        assert_eq!(w.timepoints(), vec![4, 5]);
    }

    #[test]
    fn unbounded_window_is_never_full() {
        let mut w = Window::unbounded();
        w.initialize();
        for t in 0..50 {
            w.add(t, records_with_labels(&["a"])).unwrap();
        }
        assert!(!w.is_full().unwrap());
        assert_eq!(w.len(), 50);
    }

    #[test]
    fn uninitialized_window_rejects_operations() {
        let mut w = Window::sliding(2).unwrap();
        assert!(matches!(w.forget(0), Err(Error::Uninitialized(_))));
        assert!(matches!(w.is_full(), Err(Error::Uninitialized(_))));
        assert!(w.add(0, records_with_labels(&["a"])).is_err());
    }

    #[test]
    fn zero_sizes_are_configuration_errors() {
        assert!(matches!(Window::sliding(0), Err(Error::Config(_))));
        assert!(matches!(Window::fixed_length(0), Err(Error::Config(_))));
    }

    #[test]
    fn stats_report_missing_classes_as_zero() {
        let mut w = sliding(3);
        w.add(0, records_with_labels(&["a", "a", "z"])).unwrap();
        let stats = w.stats(&["a".into(), "b".into()]).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.per_class["a"], 2);
        assert_eq!(stats.per_class["b"], 0);
        assert!(!stats.per_class.contains_key("z"));
    }

    #[test]
    fn snapshot_round_trips_through_restore() {
        let mut w = sliding(3);
        w.add(4, records_with_labels(&["a"])).unwrap();
        w.add(5, records_with_labels(&["b", "c"])).unwrap();
        let snap = w.snapshot().unwrap();

        let mut other = Window::sliding(3).unwrap();
        other.restore(snap.clone()).unwrap();
        assert_eq!(other.snapshot().unwrap(), snap);
        assert_eq!(other.timepoints(), vec![4, 5]);
    }

    #[test]
    fn restoring_too_many_partitions_fails() {
        let mut w = sliding(3);
        for t in 0..3 {
            w.add(t, records_with_labels(&["a"])).unwrap();
        }
        let snap = w.snapshot().unwrap();
        let mut small = Window::sliding(2).unwrap();
        assert!(matches!(small.restore(snap), Err(Error::Data(_))));
    }
}

use crate::error::{Error, Result};
use crate::streams::Timepoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One ledger entry: where a timepoint's batch lives and whether it was consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub filename: String,
    pub processed: bool,
}

/// Ledger of every batch in the stream, ordered by timepoint.
///
/// A row flips to `processed` exactly once and never flips back. The ledger
/// is the durable source of resumability: it is persisted after every
/// completed timepoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary {
    rows: BTreeMap<Timepoint, SummaryRow>,
}

impl Summary {
    /// Builds a fresh ledger (nothing processed) from manifest entries.
    pub fn from_manifest<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Timepoint, String)>,
    {
        let mut rows = BTreeMap::new();
        for (timepoint, filename) in entries {
            let row = SummaryRow {
                filename,
                processed: false,
            };
            if rows.insert(timepoint, row).is_some() {
                return Err(Error::config(format!(
                    "manifest lists timepoint {timepoint} more than once"
                )));
            }
        }
        if rows.is_empty() {
            return Err(Error::config("the manifest is empty"));
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_timepoint(&self) -> Option<Timepoint> {
        self.rows.keys().next().copied()
    }

    pub fn max_timepoint(&self) -> Option<Timepoint> {
        self.rows.keys().next_back().copied()
    }

    pub fn row(&self, timepoint: Timepoint) -> Option<&SummaryRow> {
        self.rows.get(&timepoint)
    }

    pub fn is_processed(&self, timepoint: Timepoint) -> bool {
        self.rows.get(&timepoint).is_some_and(|r| r.processed)
    }

    pub fn mark_processed(&mut self, timepoint: Timepoint) -> Result<()> {
        match self.rows.get_mut(&timepoint) {
            Some(row) => {
                row.processed = true;
                Ok(())
            }
            None => Err(Error::data(format!(
                "timepoint {timepoint} is not part of the summary"
            ))),
        }
    }

    /// Lowest timepoint that has not been processed yet.
    pub fn next_unprocessed(&self) -> Option<(Timepoint, &SummaryRow)> {
        self.rows
            .iter()
            .find(|(_, row)| !row.processed)
            .map(|(t, row)| (*t, row))
    }

    /// Highest processed timepoint, the engine position to resume from.
    pub fn last_processed(&self) -> Option<Timepoint> {
        self.rows
            .iter()
            .rev()
            .find(|(_, row)| row.processed)
            .map(|(t, _)| *t)
    }

    pub fn is_done(&self) -> bool {
        self.next_unprocessed().is_none()
    }

    /// Rows with timepoint `<= cutoff`, ascending.
    pub fn up_to(&self, cutoff: Timepoint) -> impl Iterator<Item = (Timepoint, &SummaryRow)> {
        self.rows.range(..=cutoff).map(|(t, row)| (*t, row))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Timepoint, &SummaryRow)> {
        self.rows.iter().map(|(t, row)| (*t, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> Summary {
        Summary::from_manifest(vec![
            (3, "c.csv".to_string()),
            (1, "a.csv".to_string()),
            (2, "b.csv".to_string()),
        ])
        .unwrap()
    }

    #[test]
    fn rows_are_ordered_by_timepoint() {
        let s = ledger();
        let order: Vec<_> = s.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(s.first_timepoint(), Some(1));
        assert_eq!(s.max_timepoint(), Some(3));
    }

    #[test]
    fn next_unprocessed_skips_processed_rows() {
        let mut s = ledger();
        assert_eq!(s.next_unprocessed().map(|(t, _)| t), Some(1));
        s.mark_processed(1).unwrap();
        s.mark_processed(2).unwrap();
        assert_eq!(s.next_unprocessed().map(|(t, _)| t), Some(3));
        assert_eq!(s.last_processed(), Some(2));
        s.mark_processed(3).unwrap();
        assert!(s.is_done());
    }

    #[test]
    fn empty_or_duplicate_manifest_is_rejected() {
        let empty: Vec<(Timepoint, String)> = vec![];
        assert!(matches!(Summary::from_manifest(empty), Err(Error::Config(_))));

        let dup = vec![(1, "a".to_string()), (1, "b".to_string())];
        assert!(matches!(Summary::from_manifest(dup), Err(Error::Config(_))));
    }

    #[test]
    fn marking_unknown_timepoint_fails() {
        let mut s = ledger();
        assert!(matches!(s.mark_processed(9), Err(Error::Data(_))));
    }

    #[test]
    fn serializes_as_a_timepoint_keyed_map() {
        let s = ledger();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.starts_with(r#"{"1":{"filename":"a.csv","processed":false}"#));
        let back: Summary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}

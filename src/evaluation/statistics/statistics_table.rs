use crate::error::Result;
use crate::evaluation::StatisticsRow;
use crate::streams::Timepoint;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CurveFormat {
    Csv,
    Tsv,
    Json,
}

/// Per-timepoint statistics of a run, keyed by timepoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticsTable {
    rows: BTreeMap<Timepoint, StatisticsRow>,
}

impl StatisticsTable {
    /// Inserts `row`, replacing an earlier row for the same timepoint.
    pub fn upsert(&mut self, row: StatisticsRow) {
        self.rows.insert(row.timepoint, row);
    }

    pub fn get(&self, timepoint: Timepoint) -> Option<&StatisticsRow> {
        self.rows.get(&timepoint)
    }

    pub fn get_mut(&mut self, timepoint: Timepoint) -> Option<&mut StatisticsRow> {
        self.rows.get_mut(&timepoint)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<&StatisticsRow> {
        self.rows.values().next_back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatisticsRow> {
        self.rows.values()
    }

    /// Union of the flat columns of every row, in a stable order.
    pub fn columns(&self) -> Vec<String> {
        let mut groups: [BTreeSet<String>; 4] = Default::default();
        let mut has_window_total = false;
        for row in self.rows.values() {
            for (name, _) in row.columns() {
                let group = match name.split_once('.').map(|(g, _)| g) {
                    Some("summary") => 0,
                    Some("window") => {
                        if name == "window.total" {
                            has_window_total = true;
                            continue;
                        }
                        1
                    }
                    Some("active_learning") => 2,
                    _ => 3,
                };
                groups[group].insert(name);
            }
        }

        let mut out = vec!["timepoint".to_string()];
        out.extend(std::mem::take(&mut groups[0]));
        if has_window_total {
            out.push("window.total".to_string());
        }
        out.extend(std::mem::take(&mut groups[1]));
        for name in [
            "active_learning.queried",
            "active_learning.answered",
            "active_learning.cost",
        ] {
            if groups[2].contains(name) {
                out.push(name.to_string());
            }
        }
        for name in ["time.test", "time.sample", "time.train"] {
            if groups[3].contains(name) {
                out.push(name.to_string());
            }
        }
        out
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: CurveFormat) -> Result<()> {
        match fmt {
            CurveFormat::Csv => self.export_with_delimiter(path, ','),
            CurveFormat::Tsv => self.export_with_delimiter(path, '\t'),
            CurveFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<()> {
        let columns = self.columns();
        let mut w = BufWriter::new(File::create(path)?);
        writeln!(w, "{}", columns.join(&delimiter.to_string()))?;
        for row in self.rows.values() {
            let values: BTreeMap<String, Option<f64>> = row.columns().into_iter().collect();
            let cells: Vec<String> = columns
                .iter()
                .map(|c| {
                    if c == "timepoint" {
                        return row.timepoint.to_string();
                    }
                    match values.get(c).copied().flatten() {
                        Some(v) if !v.is_nan() => v.to_string(),
                        _ => String::new(),
                    }
                })
                .collect();
            writeln!(w, "{}", cells.join(&delimiter.to_string()))?;
        }
        w.flush()?;
        Ok(())
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let columns = self.columns();
        let records: Vec<Value> = self
            .rows
            .values()
            .map(|row| {
                let values: BTreeMap<String, Option<f64>> = row.columns().into_iter().collect();
                let mut obj = Map::new();
                for c in &columns {
                    let v = if c == "timepoint" {
                        Value::from(row.timepoint)
                    } else {
                        values.get(c).copied().flatten().map_or(Value::Null, Value::from)
                    };
                    obj.insert(c.clone(), v);
                }
                Value::Object(obj)
            })
            .collect();
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut w, &records)?;
        writeln!(w)?;
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::active_learning::ActiveLearningStats;
    use crate::evaluation::Measurement;
    use std::fs;
    use tempfile::NamedTempFile;

    fn row(t: Timepoint, f1: f64, queried: Option<usize>) -> StatisticsRow {
        let mut r = StatisticsRow::new(t);
        r.record_measurements(vec![
            Measurement::new("accuracy", 0.5),
            Measurement::new("f1", f1),
        ]);
        r.window.total = 4;
        r.window.per_class.insert("a".into(), 3);
        r.window.per_class.insert("b".into(), 1);
        r.active_learning = queried.map(|q| ActiveLearningStats {
            queried: q,
            answered: q,
            cost: q as f64,
        });
        r.time.test = Some(0.25);
        r
    }

    #[test]
    fn default_is_empty_and_latest_none() {
        let t = StatisticsTable::default();
        assert!(t.is_empty());
        assert!(t.latest().is_none());
        assert_eq!(t.columns(), vec!["timepoint"]);
    }

    #[test]
    fn upsert_replaces_rows_for_the_same_timepoint() {
        let mut t = StatisticsTable::default();
        t.upsert(row(2, 0.1, None));
        t.upsert(row(1, 0.2, None));
        t.upsert(row(2, 0.3, None));
        assert_eq!(t.len(), 2);
        assert_eq!(t.latest().unwrap().metric("f1"), 0.3);
    }

    #[test]
    fn export_csv_leaves_undefined_cells_empty() {
        let mut t = StatisticsTable::default();
        t.upsert(row(1, f64::NAN, Some(2)));
        t.upsert(row(2, 0.5, Some(3)));

        let tf = NamedTempFile::new().unwrap();
        t.export(tf.path(), CurveFormat::Csv).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        let exp = "\
timepoint,summary.accuracy,summary.f1,window.total,window.a,window.b,active_learning.queried,active_learning.answered,active_learning.cost,time.test,time.sample,time.train
1,0.5,,4,3,1,2,2,2,0.25,,
2,0.5,0.5,4,3,1,3,3,3,0.25,,
";
        assert_eq!(got, exp);
    }

    #[test]
    fn export_tsv_uses_tabs() {
        let mut t = StatisticsTable::default();
        t.upsert(row(7, 1.0, None));
        let tf = NamedTempFile::new().unwrap();
        t.export(tf.path(), CurveFormat::Tsv).unwrap();
        let got = fs::read_to_string(tf.path()).unwrap();
        let mut lines = got.lines();
        assert_eq!(
            lines.next().unwrap(),
            "timepoint\tsummary.accuracy\tsummary.f1\twindow.total\twindow.a\twindow.b\ttime.test\ttime.sample\ttime.train"
        );
        assert_eq!(lines.next().unwrap(), "7\t0.5\t1\t4\t3\t1\t0.25\t\t");
    }

    #[test]
    fn export_json_writes_null_for_undefined_values() {
        let mut t = StatisticsTable::default();
        t.upsert(row(1, f64::NAN, None));
        let tf = NamedTempFile::new().unwrap();
        t.export(tf.path(), CurveFormat::Json).unwrap();

        let v: Value = serde_json::from_str(&fs::read_to_string(tf.path()).unwrap()).unwrap();
        let first = &v[0];
        assert_eq!(first["timepoint"], 1);
        assert!(first["summary.f1"].is_null());
        assert_eq!(first["window.a"], 3.0);
        assert!(first["time.train"].is_null());
    }

    #[test]
    fn format_names_parse() {
        assert_eq!("tsv".parse::<CurveFormat>().unwrap(), CurveFormat::Tsv);
        assert_eq!(CurveFormat::Json.to_string(), "json");
    }
}

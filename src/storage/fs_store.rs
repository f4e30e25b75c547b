use crate::core::Record;
use crate::error::{Error, Result};
use crate::storage::{Checkpoint, RunStore};
use crate::streams::{Batch, Timepoint};
use crate::utils::file_parsing::{column_index, split_record};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

const SUMMARY_FILE: &str = "summary.json";
const PARAMS_FILE: &str = "params.json";
const TIMEPOINT_COLUMN: &str = "timepoint";
const FILENAME_COLUMN: &str = "filename";

/// Filesystem layout of a run.
///
/// Batches are read relative to the manifest's directory. Checkpoints go to
/// `<manifest dir>/results/<strategy>/<availability>/summary.json`, one
/// document holding the ledger, statistics, window and committed timepoint.
/// Every file is written to a temporary sibling and renamed into place.
#[derive(Debug, Clone)]
pub struct FsStore {
    manifest: PathBuf,
    data_dir: PathBuf,
    run_dir: PathBuf,
    target_column: String,
}

impl FsStore {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(manifest: P, target_column: S) -> Self {
        let manifest = manifest.into();
        let data_dir = manifest
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let run_dir = data_dir.join("results");
        Self {
            manifest,
            data_dir,
            run_dir,
            target_column: target_column.into(),
        }
    }

    /// Scopes the results directory to a strategy and oracle availability.
    pub fn for_run(mut self, strategy: Option<&str>, availability: Option<f64>) -> Self {
        let mut dir = self.data_dir.join("results");
        if let Some(s) = strategy {
            dir.push(s);
        }
        if let Some(a) = availability {
            dir.push(a.to_string());
        }
        self.run_dir = dir;
        self
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    fn write_atomic<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.run_dir)?;
        let mut tmp = NamedTempFile::new_in(&self.run_dir)?;
        serde_json::to_writer_pretty(&mut tmp, value)?;
        tmp.write_all(b"\n")?;
        tmp.persist(self.run_dir.join(name)).map_err(|e| e.error)?;
        Ok(())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Result<T> {
        let path = self.run_dir.join(name);
        if !path.exists() {
            return Err(Error::data(format!("{} is missing", path.display())));
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    fn parse_csv_batch(&self, timepoint: Timepoint, path: &Path) -> Result<Batch> {
        let text = fs::read_to_string(path)?;
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let Some(header) = lines.next() else {
            return Ok(Batch::new(timepoint, Vec::new()));
        };
        let header = split_record(header, ',');
        let target = column_index(&header, &self.target_column).ok_or_else(|| {
            Error::config(format!(
                "{} has no target column '{}'",
                path.display(),
                self.target_column
            ))
        })?;

        let rows: Vec<Vec<String>> = lines.map(|l| split_record(l, ',')).collect();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(Error::data(format!(
                    "{} line {}: expected {} fields, got {}",
                    path.display(),
                    i + 2,
                    header.len(),
                    row.len()
                )));
            }
        }

        let single_text_column = header.len() == 2
            && rows
                .iter()
                .any(|r| r[1 - target].parse::<f64>().is_err());

        let mut records = Vec::with_capacity(rows.len());
        for (i, mut row) in rows.into_iter().enumerate() {
            let label = row.remove(target);
            if single_text_column {
                records.push(Record::text(row.remove(0), label));
                continue;
            }
            let values = row
                .iter()
                .map(|v| v.parse::<f64>())
                .collect::<std::result::Result<Vec<f64>, _>>()
                .map_err(|e| {
                    Error::data(format!("{} line {}: {e}", path.display(), i + 2))
                })?;
            records.push(Record::numeric(values, label));
        }
        Ok(Batch::new(timepoint, records))
    }
}

impl RunStore for FsStore {
    fn location(&self) -> String {
        self.run_dir.display().to_string()
    }

    fn load_manifest(&self) -> Result<Vec<(Timepoint, String)>> {
        let text = fs::read_to_string(&self.manifest)?;
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let header = split_record(lines.next().unwrap_or_default(), ',');
        let (Some(tp), Some(file)) = (
            column_index(&header, TIMEPOINT_COLUMN),
            column_index(&header, FILENAME_COLUMN),
        ) else {
            return Err(Error::config(format!(
                "the manifest needs the columns '{TIMEPOINT_COLUMN}' and '{FILENAME_COLUMN}'"
            )));
        };

        lines
            .enumerate()
            .map(|(i, line)| {
                let row = split_record(line, ',');
                let (Some(t), Some(f)) = (row.get(tp), row.get(file)) else {
                    return Err(Error::data(format!("manifest line {} is incomplete", i + 2)));
                };
                let t = t.parse::<Timepoint>().map_err(|e| {
                    Error::data(format!("manifest line {}: bad timepoint '{t}': {e}", i + 2))
                })?;
                Ok((t, f.clone()))
            })
            .collect()
    }

    fn load_batch(&self, timepoint: Timepoint, reference: &str) -> Result<Batch> {
        let path = self.data_dir.join(reference);
        debug!(timepoint, path = %path.display(), "loading batch");
        let is_json = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            let records: Vec<Record> = serde_json::from_str(&fs::read_to_string(&path)?)?;
            Ok(Batch::new(timepoint, records))
        } else {
            self.parse_csv_batch(timepoint, &path)
        }
    }

    fn checkpoint_exists(&self) -> Result<bool> {
        Ok(self.run_dir.join(SUMMARY_FILE).try_exists()?)
    }

    /// Ledger, statistics and window go into one document so a checkpoint
    /// is committed by a single rename.
    fn save_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<()> {
        self.write_atomic(SUMMARY_FILE, checkpoint)
    }

    fn load_checkpoint(&self) -> Result<Checkpoint> {
        self.read_json(SUMMARY_FILE)
    }

    fn save_parameters(&mut self, parameters: &Value) -> Result<()> {
        self.write_atomic(
            PARAMS_FILE,
            &json!({
                "written_at": Utc::now().to_rfc3339(),
                "parameters": parameters,
            }),
        )
    }
}

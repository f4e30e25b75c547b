use crate::error::Result;
use crate::storage::Checkpoint;
use crate::streams::{Batch, Timepoint};
use serde_json::Value;

/// Durable storage of one run: its input batches and its checkpoint.
///
/// The presence of a saved checkpoint is the only signal used to decide
/// between restoring and starting fresh.
pub trait RunStore {
    /// Human readable location of the run, used in logs.
    fn location(&self) -> String;

    /// `(timepoint, reference)` pairs of every batch in the stream.
    fn load_manifest(&self) -> Result<Vec<(Timepoint, String)>>;

    fn load_batch(&self, timepoint: Timepoint, reference: &str) -> Result<Batch>;

    fn checkpoint_exists(&self) -> Result<bool>;

    fn save_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<()>;

    fn load_checkpoint(&self) -> Result<Checkpoint>;

    fn save_parameters(&mut self, parameters: &Value) -> Result<()>;
}

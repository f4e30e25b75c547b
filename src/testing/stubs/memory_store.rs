use crate::core::Record;
use crate::error::{Error, Result};
use crate::storage::{Checkpoint, RunStore};
use crate::streams::{Batch, Timepoint};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Default)]
struct Inner {
    manifest: Vec<(Timepoint, String)>,
    batches: BTreeMap<String, Vec<Record>>,
    checkpoint: Option<String>,
    parameters: Option<Value>,
    saves: usize,
}

/// Inspects what a [`MemoryStore`] persisted, even after the store was
/// moved into an engine.
#[derive(Clone)]
pub struct MemoryHandle(Rc<RefCell<Inner>>);

impl MemoryHandle {
    /// The last saved checkpoint as JSON text.
    pub fn checkpoint_json(&self) -> Option<String> {
        self.0.borrow().checkpoint.clone()
    }

    pub fn checkpoint(&self) -> Option<Checkpoint> {
        self.checkpoint_json()
            .and_then(|s| serde_json::from_str(&s).ok())
    }

    pub fn parameters(&self) -> Option<Value> {
        self.0.borrow().parameters.clone()
    }

    pub fn saves(&self) -> usize {
        self.0.borrow().saves
    }

    /// A second store over the same data and checkpoint, as after a restart.
    pub fn reopen(&self) -> MemoryStore {
        MemoryStore(self.clone())
    }
}

/// Run store kept in memory. Checkpoints are held as serialized JSON so
/// tests can compare saved content byte for byte.
pub struct MemoryStore(MemoryHandle);

impl MemoryStore {
    pub fn new() -> (Self, MemoryHandle) {
        let handle = MemoryHandle(Rc::new(RefCell::new(Inner::default())));
        (Self(handle.clone()), handle)
    }

    /// Registers `batch` in the manifest under a generated reference.
    pub fn with_batch(self, batch: Batch) -> Self {
        {
            let mut inner = self.0.0.borrow_mut();
            let reference = format!("batch-{}", batch.timepoint());
            inner.manifest.push((batch.timepoint(), reference.clone()));
            inner.batches.insert(reference, batch.into_records());
        }
        self
    }
}

impl RunStore for MemoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn load_manifest(&self) -> Result<Vec<(Timepoint, String)>> {
        Ok(self.0.0.borrow().manifest.clone())
    }

    fn load_batch(&self, timepoint: Timepoint, reference: &str) -> Result<Batch> {
        let inner = self.0.0.borrow();
        let records = inner
            .batches
            .get(reference)
            .cloned()
            .ok_or_else(|| Error::data(format!("unknown batch {reference}")))?;
        Ok(Batch::new(timepoint, records))
    }

    fn checkpoint_exists(&self) -> Result<bool> {
        Ok(self.0.0.borrow().checkpoint.is_some())
    }

    fn save_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<()> {
        let json = serde_json::to_string(checkpoint)?;
        let mut inner = self.0.0.borrow_mut();
        inner.checkpoint = Some(json);
        inner.saves += 1;
        Ok(())
    }

    fn load_checkpoint(&self) -> Result<Checkpoint> {
        let inner = self.0.0.borrow();
        let json = inner
            .checkpoint
            .as_deref()
            .ok_or_else(|| Error::data("no checkpoint saved"))?;
        Ok(serde_json::from_str(json)?)
    }

    fn save_parameters(&mut self, parameters: &Value) -> Result<()> {
        self.0.0.borrow_mut().parameters = Some(parameters.clone());
        Ok(())
    }
}

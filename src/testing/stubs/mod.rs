mod memory_store;
mod scripted_classifier;

pub use memory_store::{MemoryHandle, MemoryStore};
pub use scripted_classifier::{FitCounter, ScriptedClassifier};

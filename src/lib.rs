pub mod active_learning;
pub mod classifiers;
pub mod core;
pub mod error;
pub mod evaluation;
pub mod oracle;
pub mod pipelines;
pub mod storage;
pub mod streams;
pub mod tasks;
pub mod ui;
pub mod utils;
pub mod windows;

pub use error::{Error, Result};

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

use strum_macros::{Display, IntoStaticStr};

/// Lifecycle of a [`StreamEngine`](crate::tasks::StreamEngine).
///
/// `Uninitialized -> Initializing -> (Restoring) -> Ready`, then
/// `Testing -> Sampling -> Training -> Ready` once per timepoint, and `Done`
/// when the ledger has nothing left to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EngineState {
    Uninitialized,
    Initializing,
    Restoring,
    Ready,
    Testing,
    Sampling,
    Training,
    Done,
}

mod checkpoint;
mod fs_store;
mod run_store;

pub use checkpoint::Checkpoint;
pub use fs_store::FsStore;
pub use run_store::RunStore;

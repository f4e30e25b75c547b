mod args;
mod commands;

pub use args::{Cli, Command, RunArgs};
pub use commands::{execute, list_components};

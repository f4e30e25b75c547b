mod evaluation_choice;
mod model_choice;
mod oracle_choice;
mod run_config;
mod schema;
mod strategy_choice;
mod ui_choice;
mod window_choice;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use evaluation_choice::*;
pub use model_choice::*;
pub use oracle_choice::*;
pub use run_config::{ActiveLearningConfig, RunConfig};
pub use schema::{ParameterSpec, parameter_specs};
pub use strategy_choice::*;
pub use ui_choice::UIChoice;
pub(crate) use ui_choice::params_of;
pub use window_choice::*;

/// Empty parameter object so every kind still carries a `params` key.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct NoParams {}

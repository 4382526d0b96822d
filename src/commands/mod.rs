//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod fetch;
pub mod models;
pub mod plan;
pub mod utils;

// Re-export main command functions
pub use fetch::{execute_fetch, validate_args};
pub use models::{FetchArgs, OutputFormat, PlanArgs};
pub use plan::execute_plan;
pub use utils::{display_version, init_config, load_config, validate_config};

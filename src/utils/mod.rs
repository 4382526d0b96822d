//! Utility modules for configuration, error handling, and state lookup.

pub mod config;
pub mod error;
pub mod states;

// Re-export commonly used error types for convenience
pub use error::{AggregateError, CensusError, ConfigError, GeometryError, OutputError, QueryError};
pub use states::{lookup_state, State};

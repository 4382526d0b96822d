//! Survey API communication.

pub mod client;
pub mod types;

pub use client::{endpoint, parse_response, query_params, CensusClient, SurveySource};
pub use types::RawTable;

//! In-memory tables produced by aggregation and joining.

pub mod frame;

pub use frame::{outer_join_keys, Column, Frame, RowKey};

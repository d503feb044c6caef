//! recall-trace library
//!
//! Builds upstream ingredient sourcing reports for product recalls. A
//! product's lots and serials are traced upstream, hydrated with events and
//! master data, and flattened into one row per ingredient.
//! It can be used both as a binary and as a library for testing.

pub mod cli;
pub mod config;
pub mod master_data;
pub mod models;
pub mod report;
pub mod resolve;
pub mod services;
pub mod trace;

// Re-export commonly used types for convenience
pub use master_data::{EventJoin, MasterData};
pub use report::{Column, IngredientReport, ReportRow, RowFlattener};
pub use services::{IngredientSources, TraceFilter, TraceService};
pub use trace::{ParentAliasIndex, TraceNode};

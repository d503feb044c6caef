//! Service layer
//!
//! [`TraceService`] is the seam to the trace backend. The HTTP client talks
//! to a live service; the file service answers from a fixture.
//! [`IngredientSources`] drives one report request through either.

pub mod file;
pub mod http;
pub mod ingredient_sources;
pub mod trace_service;

pub use file::{FileTraceService, TraceFixture};
pub use http::HttpTraceService;
pub use ingredient_sources::{DEFAULT_MAX_TRACED_ITEMS, IngredientSources};
pub use trace_service::{TraceDirection, TraceFilter, TraceService};

use anyhow::Result;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ServiceConfig;

/// Errors raised by trace service clients
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Trace service not configured: set {0}")]
    NotConfigured(String),

    #[error("Request to {endpoint} failed with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    #[error("Fixture error: {0}")]
    Fixture(String),
}

/// Create a trace service: the fixture when given, otherwise HTTP
pub fn create_trace_service(
    config: &ServiceConfig,
    fixture: Option<PathBuf>,
) -> Result<Box<dyn TraceService>> {
    match fixture {
        Some(path) => Ok(Box::new(FileTraceService::new(path))),
        None => Ok(Box::new(HttpTraceService::new(config)?)),
    }
}

//! File-backed trace service (for offline runs and testing)

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use super::ServiceError;
use super::trace_service::{TraceDirection, TraceFilter, TraceService};
use crate::models::{Event, Location, Product};
use crate::trace::TraceNode;

/// Contents of a fixture file
///
/// Keys use the service wire format; every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct TraceFixture {
    /// Item tags per product id
    #[serde(default)]
    pub lots_and_serials: HashMap<String, Vec<String>>,
    /// Upstream trace roots
    #[serde(default)]
    pub trace: Vec<TraceNode>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// File trace service
///
/// Answers every request from a local JSON fixture. The file is re-read on
/// each call, so it can be edited between runs of a long session.
pub struct FileTraceService {
    file_path: PathBuf,
}

impl FileTraceService {
    /// Create a new file trace service
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        tracing::debug!("Created file trace service: {:?}", file_path);
        Self { file_path }
    }

    async fn fixture(&self) -> Result<TraceFixture> {
        tracing::debug!("Reading fixture: {:?}", self.file_path);

        let content = tokio::fs::read_to_string(&self.file_path)
            .await
            .with_context(|| format!("Failed to read fixture: {:?}", self.file_path))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixture: {:?}", self.file_path))
    }
}

#[async_trait]
impl TraceService for FileTraceService {
    async fn fetch_lots_and_serials(&self, filter: &TraceFilter) -> Result<Vec<String>> {
        let mut fixture = self.fixture().await?;
        Ok(fixture
            .lots_and_serials
            .remove(&filter.product_id)
            .unwrap_or_default())
    }

    async fn run_trace(
        &self,
        _filter: &TraceFilter,
        item_ids: &[String],
        direction: TraceDirection,
    ) -> Result<Vec<TraceNode>> {
        if !direction.upstream() {
            return Err(ServiceError::Fixture(
                "fixtures only hold upstream traces".to_string(),
            )
            .into());
        }
        let wanted: HashSet<&str> = item_ids.iter().map(String::as_str).collect();
        let fixture = self.fixture().await?;
        Ok(fixture
            .trace
            .into_iter()
            .filter(|root| wanted.contains(root.item_id.as_str()))
            .collect())
    }

    async fn fetch_events(&self, filter: &TraceFilter, asset_ids: &[String]) -> Result<Vec<Event>> {
        let wanted: HashSet<&str> = asset_ids.iter().map(String::as_str).collect();
        let fixture = self.fixture().await?;
        Ok(fixture
            .events
            .into_iter()
            .filter(|e| wanted.contains(e.asset_id.as_str()) && filter.admits_event(&e.event_time))
            .collect())
    }

    async fn fetch_locations(
        &self,
        _filter: &TraceFilter,
        location_ids: &[String],
    ) -> Result<Vec<Location>> {
        let wanted: HashSet<&str> = location_ids.iter().map(String::as_str).collect();
        let fixture = self.fixture().await?;
        Ok(fixture
            .locations
            .into_iter()
            .filter(|l| wanted.contains(l.id.as_str()))
            .collect())
    }

    async fn fetch_products(&self, _filter: &TraceFilter, gtins: &[String]) -> Result<Vec<Product>> {
        let wanted: HashSet<&str> = gtins.iter().map(String::as_str).collect();
        let fixture = self.fixture().await?;
        Ok(fixture
            .products
            .into_iter()
            .filter(|p| wanted.contains(p.gtin.as_str()))
            .collect())
    }
}

//! Trace service trait and request filter

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Event, Location, Product};
use crate::trace::TraceNode;

/// Product and date window a request is scoped to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceFilter {
    /// Product id (GTIN or product class URN) whose lots and serials are traced
    pub product_id: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl TraceFilter {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            ..Default::default()
        }
    }

    /// Whether an event falls inside the window
    ///
    /// Only the end date applies: an item's origin events can precede the
    /// start date by a long way.
    pub fn admits_event(&self, time: &DateTime<Utc>) -> bool {
        self.end_date.is_none_or(|end| time.date_naive() <= end)
    }
}

/// Direction of a trace request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceDirection {
    Upstream,
    Downstream,
    Both,
}

impl TraceDirection {
    pub fn upstream(&self) -> bool {
        matches!(self, TraceDirection::Upstream | TraceDirection::Both)
    }

    pub fn downstream(&self) -> bool {
        matches!(self, TraceDirection::Downstream | TraceDirection::Both)
    }
}

/// Collaborator that materializes trace data for one request
///
/// Implementations do not retry; any error aborts the request.
#[async_trait]
pub trait TraceService: Send + Sync {
    /// Item tags of every lot and serial of the filtered product
    async fn fetch_lots_and_serials(&self, filter: &TraceFilter) -> Result<Vec<String>>;

    /// Trace forest rooted at each of `item_ids`
    async fn run_trace(
        &self,
        filter: &TraceFilter,
        item_ids: &[String],
        direction: TraceDirection,
    ) -> Result<Vec<TraceNode>>;

    /// Event records for the given asset ids
    async fn fetch_events(&self, filter: &TraceFilter, asset_ids: &[String]) -> Result<Vec<Event>>;

    /// Location master records for the given ids
    async fn fetch_locations(
        &self,
        filter: &TraceFilter,
        location_ids: &[String],
    ) -> Result<Vec<Location>>;

    /// Product master records for the given GTINs
    async fn fetch_products(&self, filter: &TraceFilter, gtins: &[String]) -> Result<Vec<Product>>;
}

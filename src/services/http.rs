//! HTTP trace service client

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use url::Url;

use super::ServiceError;
use super::trace_service::{TraceDirection, TraceFilter, TraceService};
use crate::config::ServiceConfig;
use crate::models::{Event, Location, Product};
use crate::trace::TraceNode;

const LOTS_AND_SERIALS_PATH: &str = "lots_and_serials";
const TRACE_PATH: &str = "epcs/trace";
const EVENTS_PATH: &str = "events/query";
const LOCATIONS_PATH: &str = "locations/query";
const PRODUCTS_PATH: &str = "products/query";

/// Lot or serial entry returned by the lots-and-serials endpoint
#[derive(Debug, serde::Deserialize)]
struct LotOrSerial {
    #[serde(alias = "epc_id")]
    id: String,
}

/// HTTP trace service
pub struct HttpTraceService {
    client: reqwest::Client,
    base_url: Url,
    token_env: Option<String>,
}

impl HttpTraceService {
    /// Create a new HTTP trace service
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let raw = config
            .base_url
            .clone()
            .ok_or_else(|| ServiceError::NotConfigured("service.baseUrl".to_string()))?;
        // Url::join drops the last path segment unless it ends with a slash
        let raw = if raw.ends_with('/') {
            raw
        } else {
            format!("{}/", raw)
        };
        let base_url =
            Url::parse(&raw).with_context(|| format!("Invalid service base URL: {}", raw))?;

        let timeout = parse_duration(&config.timeout)?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        tracing::debug!("Created HTTP trace service for: {}", base_url);

        Ok(Self {
            client,
            base_url,
            token_env: config.token_env.clone(),
        })
    }

    /// Apply bearer authentication when the configured token variable is set
    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let Some(var_name) = &self.token_env else {
            return req;
        };
        match std::env::var(var_name) {
            Ok(token) => req.bearer_auth(token),
            Err(_) => {
                tracing::debug!("{} not set, sending unauthenticated request", var_name);
                req
            }
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid endpoint path: {}", path))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &Url,
        req: reqwest::RequestBuilder,
    ) -> Result<T> {
        let resp = self
            .apply_auth(req)
            .send()
            .await
            .with_context(|| format!("Failed to reach: {}", endpoint))?;

        if !resp.status().is_success() {
            return Err(ServiceError::Status {
                endpoint: endpoint.to_string(),
                status: resp.status().as_u16(),
            }
            .into());
        }

        resp.json().await.map_err(|e| {
            ServiceError::InvalidResponse {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!("POST {}", endpoint);
        let req = self.client.post(endpoint.clone()).json(body);
        self.send(&endpoint, req).await
    }
}

#[async_trait]
impl TraceService for HttpTraceService {
    async fn fetch_lots_and_serials(&self, filter: &TraceFilter) -> Result<Vec<String>> {
        let endpoint = self.endpoint(LOTS_AND_SERIALS_PATH)?;
        let mut query = vec![("product_id", filter.product_id.clone())];
        if let Some(start) = filter.start_date {
            query.push(("event_start_timestamp", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = filter.end_date {
            query.push(("event_end_timestamp", end.format("%Y-%m-%d").to_string()));
        }

        tracing::debug!("GET {} for product {}", endpoint, filter.product_id);
        let req = self.client.get(endpoint.clone()).query(&query);
        let entries: Vec<LotOrSerial> = self.send(&endpoint, req).await?;

        Ok(entries.into_iter().map(|entry| entry.id).collect())
    }

    async fn run_trace(
        &self,
        _filter: &TraceFilter,
        item_ids: &[String],
        direction: TraceDirection,
    ) -> Result<Vec<TraceNode>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        let body = json!({
            "epc_ids": item_ids,
            "upstream": direction.upstream(),
            "downstream": direction.downstream(),
        });
        self.post(TRACE_PATH, &body).await
    }

    async fn fetch_events(&self, filter: &TraceFilter, asset_ids: &[String]) -> Result<Vec<Event>> {
        if asset_ids.is_empty() {
            return Ok(Vec::new());
        }
        let body = json!({
            "asset_ids": asset_ids,
            "event_end_timestamp": filter.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
        });
        self.post(EVENTS_PATH, &body).await
    }

    async fn fetch_locations(
        &self,
        _filter: &TraceFilter,
        location_ids: &[String],
    ) -> Result<Vec<Location>> {
        if location_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.post(LOCATIONS_PATH, &json!({ "ids": location_ids })).await
    }

    async fn fetch_products(&self, _filter: &TraceFilter, gtins: &[String]) -> Result<Vec<Product>> {
        if gtins.is_empty() {
            return Ok(Vec::new());
        }
        self.post(PRODUCTS_PATH, &json!({ "ids": gtins })).await
    }
}

/// Parse duration string (e.g., "30s", "1m", "5s")
pub fn parse_duration(s: &str) -> Result<Duration> {
    if let Some(secs) = s.strip_suffix("ms") {
        let ms: u64 = secs.parse().context("Invalid duration")?;
        Ok(Duration::from_millis(ms))
    } else if let Some(secs) = s.strip_suffix('s') {
        let secs: u64 = secs.parse().context("Invalid duration")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(mins) = s.strip_suffix('m') {
        let mins: u64 = mins.parse().context("Invalid duration")?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow::anyhow!("Duration too large: {}", s))?;
        Ok(Duration::from_secs(secs))
    } else {
        anyhow::bail!("Invalid duration format: {}", s)
    }
}

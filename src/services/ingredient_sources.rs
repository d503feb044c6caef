//! Ingredient sourcing service
//!
//! Runs one request end to end against a [`TraceService`]: finds the
//! product's lots and serials, traces them upstream, hydrates the forest with
//! events and master data, and flattens it into report rows.

use anyhow::{Context, Result};

use super::trace_service::{TraceDirection, TraceFilter, TraceService};
use crate::master_data::EventJoin;
use crate::report::{IngredientReport, RowFlattener};
use crate::trace::{ParentAliasIndex, collect_forest_assets};

/// Default cap on traced items per request
pub const DEFAULT_MAX_TRACED_ITEMS: usize = 50;

/// Service for ingredient sourcing reports
pub struct IngredientSources {
    service: Box<dyn TraceService>,
    max_traced_items: usize,
}

impl IngredientSources {
    pub fn new(service: Box<dyn TraceService>) -> Self {
        Self {
            service,
            max_traced_items: DEFAULT_MAX_TRACED_ITEMS,
        }
    }

    /// Set the largest number of lots and serials a request may trace
    pub fn with_max_traced_items(mut self, max: usize) -> Self {
        self.max_traced_items = max;
        self
    }

    /// Build the ingredient report for one product and date window
    pub async fn report(&self, filter: &TraceFilter) -> Result<IngredientReport> {
        let items = self
            .service
            .fetch_lots_and_serials(filter)
            .await
            .context("Failed to fetch lots and serials")?;

        if items.len() > self.max_traced_items {
            tracing::warn!(
                "{} lot(s) and serial(s) for {} exceed the limit of {}",
                items.len(),
                filter.product_id,
                self.max_traced_items
            );
            return Ok(IngredientReport::TooLarge {
                traced_items: items.len(),
                limit: self.max_traced_items,
            });
        }

        if items.is_empty() {
            tracing::info!("No lots or serials found for {}", filter.product_id);
            return Ok(IngredientReport::empty());
        }

        let forest = self
            .service
            .run_trace(filter, &items, TraceDirection::Upstream)
            .await
            .context("Failed to run upstream trace")?;

        if forest.is_empty() {
            tracing::info!("Upstream trace for {} returned no items", filter.product_id);
            return Ok(IngredientReport::empty());
        }

        let mut aliases = ParentAliasIndex::new();
        let asset_ids: Vec<String> = collect_forest_assets(&forest, &mut aliases)
            .into_iter()
            .collect();

        let events = self
            .service
            .fetch_events(filter, &asset_ids)
            .await
            .context("Failed to fetch events")?;

        let join = EventJoin::from_events(events);
        let location_ids = join.location_ids();
        let gtins = join.gtins();

        let (locations, products) = futures::try_join!(
            async {
                self.service
                    .fetch_locations(filter, &location_ids)
                    .await
                    .context("Failed to fetch locations")
            },
            async {
                self.service
                    .fetch_products(filter, &gtins)
                    .await
                    .context("Failed to fetch products")
            },
        )?;

        let data = join.hydrate(locations, products, aliases);
        let rows = RowFlattener::new(&data).expand_all(&forest);

        tracing::info!(
            "Built {} row(s) from {} traced item(s) for {}",
            rows.len(),
            forest.len(),
            filter.product_id
        );

        Ok(IngredientReport::Rows(rows))
    }
}

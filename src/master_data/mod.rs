//! Master-data joining
//!
//! Merges hydrated events with location and product master records into one
//! request-scoped context. Joining happens in two steps because the master
//! lookups are keyed on ids only known once events are in hand:
//!
//! 1. [`EventJoin::from_events`] indexes events and derives the location ids
//!    and product GTINs that need master records.
//! 2. [`EventJoin::hydrate`] folds the fetched master records in and yields
//!    the read-only [`MasterData`] used for row building.

mod context;
mod locations;

pub use context::{MasterData, NodeEvents, ProductMatch};
pub use locations::LocationTable;

use std::collections::{BTreeSet, HashMap};

use crate::models::{Event, Location, Product, decode_item_tag};
use crate::trace::ParentAliasIndex;

/// Events indexed by asset id, plus the master-data keys they reference
#[derive(Debug, Clone, Default)]
pub struct EventJoin {
    events: HashMap<String, Event>,
    locations: LocationTable,
    gtins: BTreeSet<String>,
}

impl EventJoin {
    /// Index events and collect the location ids and GTINs they reference
    ///
    /// Item tags that do not decode to a product are skipped.
    pub fn from_events(events: Vec<Event>) -> Self {
        let mut join = Self::default();

        for event in events {
            for location_id in event.location_ids() {
                join.locations.seed(location_id);
            }

            for tag in &event.item_tags {
                match decode_item_tag(tag) {
                    Some(product) => {
                        join.gtins.insert(product.gtin);
                    }
                    None => tracing::trace!("Item tag {} does not identify a product", tag),
                }
            }

            if let Some(previous) = join.events.insert(event.asset_id.clone(), event) {
                tracing::debug!("Duplicate event record for asset {}", previous.asset_id);
            }
        }

        tracing::debug!(
            "Joined {} event(s): {} location id(s), {} product GTIN(s)",
            join.events.len(),
            join.locations.len(),
            join.gtins.len()
        );

        join
    }

    /// Location ids to look up, in stable order
    pub fn location_ids(&self) -> Vec<String> {
        self.locations.ids().map(str::to_string).collect()
    }

    /// Product GTINs to look up, in stable order
    pub fn gtins(&self) -> Vec<String> {
        self.gtins.iter().cloned().collect()
    }

    /// Fold fetched master records in and produce the request context
    pub fn hydrate(
        self,
        locations: Vec<Location>,
        products: Vec<Product>,
        aliases: ParentAliasIndex,
    ) -> MasterData {
        let mut table = self.locations;
        for location in locations {
            table.populate(location);
        }

        let unresolved = table.unresolved_count();
        if unresolved > 0 {
            tracing::warn!("{} location id(s) have no master record", unresolved);
        }

        MasterData::new(self.events, table, products, aliases)
    }
}

//! Request-scoped master-data context

use std::collections::{HashMap, HashSet};

use crate::master_data::locations::LocationTable;
use crate::models::{Event, Product, decode_item_tag};
use crate::trace::{ParentAliasIndex, TraceNode};

/// Everything row building reads, built once per request
#[derive(Debug, Clone, Default)]
pub struct MasterData {
    events: HashMap<String, Event>,
    locations: LocationTable,
    products: Vec<Product>,
    aliases: ParentAliasIndex,
}

/// Hydrated events of one trace node
#[derive(Debug, Clone, Default)]
pub struct NodeEvents<'a> {
    /// Own events first, then alias-derived events; each asset at most once
    pub events: Vec<&'a Event>,
    /// Organization of the first hydrated event that names one
    pub org_id: Option<&'a str>,
}

/// Product identity fields chosen from master data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductMatch {
    pub gtin: Option<String>,
    pub name: Option<String>,
}

impl MasterData {
    pub fn new(
        events: HashMap<String, Event>,
        locations: LocationTable,
        products: Vec<Product>,
        aliases: ParentAliasIndex,
    ) -> Self {
        Self {
            events,
            locations,
            products,
            aliases,
        }
    }

    pub fn event(&self, asset_id: &str) -> Option<&Event> {
        self.events.get(asset_id)
    }

    pub fn locations(&self) -> &LocationTable {
        &self.locations
    }

    pub fn aliases(&self) -> &ParentAliasIndex {
        &self.aliases
    }

    /// Hydrate a node's own events and every event its parent aliases contribute
    ///
    /// References with no event record are dropped.
    pub fn node_events(&self, node: &TraceNode) -> NodeEvents<'_> {
        let mut seen = HashSet::new();
        let mut hydrated = NodeEvents::default();

        let alias_assets = node.parent_aliases.iter().flat_map(|alias| {
            let assets = self.aliases.get(&alias.alias_id);
            if assets.is_none() {
                tracing::warn!(
                    "Parent alias {} of {} was never indexed",
                    alias.alias_id,
                    node.item_id
                );
            }
            assets.unwrap_or_default().iter().map(String::as_str)
        });

        for asset_id in node.asset_ids().chain(alias_assets) {
            if !seen.insert(asset_id) {
                continue;
            }
            if let Some(event) = self.events.get(asset_id) {
                if hydrated.org_id.is_none() {
                    hydrated.org_id = event.org_id.as_deref();
                }
                hydrated.events.push(event);
            }
        }

        hydrated
    }

    /// Pick the product master record for an item tag
    ///
    /// When several organizations own a record for the decoded GTIN, the one
    /// owned by `org_id` wins; otherwise the first record is used.
    pub fn product_match(&self, item_id: &str, org_id: Option<&str>) -> ProductMatch {
        let Some(identity) = decode_item_tag(item_id) else {
            tracing::debug!("Item {} does not decode to a product", item_id);
            return ProductMatch::default();
        };

        let candidates: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| product.gtin == identity.gtin)
            .collect();

        let owned = if candidates.len() > 1 {
            candidates
                .iter()
                .find(|product| org_id.is_some() && product.owner_org_id.as_deref() == org_id)
        } else {
            None
        };

        match owned.or(candidates.first()) {
            Some(product) => ProductMatch {
                gtin: Some(product.gtin.clone()),
                name: product.description.clone(),
            },
            None => ProductMatch::default(),
        }
    }
}

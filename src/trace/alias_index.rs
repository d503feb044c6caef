//! Request-scoped parent alias index
//!
//! The trace service reports an item that appears under several identifiers
//! only once in full; every other occurrence is a parent alias carrying the
//! events it contributes. The index keeps one deduplicated asset list per
//! alias id so that every node referencing the alias sees the same events.
//!
//! One index belongs to one request. Sharing an index between requests would
//! merge unrelated contributions.

use std::collections::HashMap;

use crate::trace::models::{EventRef, TraceNode};

/// Alias id -> deduplicated asset ids, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct ParentAliasIndex {
    entries: HashMap<String, Vec<String>>,
}

impl ParentAliasIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge an alias occurrence into the index and return its asset list
    ///
    /// The first occurrence of `alias_id` stores the asset ids drawn from
    /// `events`; later occurrences append only ids not already stored.
    pub fn resolve(&mut self, alias_id: &str, events: &[EventRef]) -> &[String] {
        let assets = self.entries.entry(alias_id.to_string()).or_default();
        for asset_id in events.iter().filter_map(EventRef::asset_id) {
            if !assets.iter().any(|known| known == asset_id) {
                assets.push(asset_id.to_string());
            }
        }
        assets
    }

    /// Merge every alias reachable from `node` and return the asset ids they contribute
    ///
    /// Walks the node's own parent aliases, then recurses into its inputs.
    /// The result may contain repeats; callers union it into a set.
    pub fn collect(&mut self, node: &TraceNode) -> Vec<String> {
        let mut assets = Vec::new();
        for alias in &node.parent_aliases {
            assets.extend_from_slice(self.resolve(&alias.alias_id, &alias.events));
        }
        for input in &node.input_nodes {
            assets.extend(self.collect(input));
        }
        assets
    }

    /// Stored asset ids for an alias
    pub fn get(&self, alias_id: &str) -> Option<&[String]> {
        self.entries.get(alias_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

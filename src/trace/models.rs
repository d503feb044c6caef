//! Data structures for trace results

use serde::{Deserialize, Serialize};

/// A node in the upstream trace forest
///
/// One node per tagged item. `input_nodes` are the items that were combined
/// or transformed to produce it; an empty list means no known ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceNode {
    #[serde(rename = "epc_id")]
    pub item_id: String,
    #[serde(default)]
    pub events: Vec<EventRef>,
    #[serde(rename = "parent_epcs", default)]
    pub parent_aliases: Vec<ParentAlias>,
    #[serde(rename = "input_epcs", default)]
    pub input_nodes: Vec<TraceNode>,
}

impl TraceNode {
    /// Create a leaf node with the given event references
    pub fn new(item_id: impl Into<String>, asset_ids: &[&str]) -> Self {
        Self {
            item_id: item_id.into(),
            events: asset_ids.iter().map(|id| EventRef::new(*id)).collect(),
            parent_aliases: Vec::new(),
            input_nodes: Vec::new(),
        }
    }

    /// Add an ingredient node
    pub fn with_input(mut self, input: TraceNode) -> Self {
        self.input_nodes.push(input);
        self
    }

    /// Add a parent alias
    pub fn with_alias(mut self, alias: ParentAlias) -> Self {
        self.parent_aliases.push(alias);
        self
    }

    /// Asset ids referenced directly by this node, skipping empty references
    pub fn asset_ids(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(EventRef::asset_id)
    }

    /// Number of nodes in this subtree, excluding this node
    pub fn descendant_count(&self) -> usize {
        self.input_nodes
            .iter()
            .map(|input| 1 + input.descendant_count())
            .sum()
    }
}

/// Another identifier under which an item already in the trace appears
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentAlias {
    #[serde(rename = "epc_id")]
    pub alias_id: String,
    #[serde(default)]
    pub events: Vec<EventRef>,
}

impl ParentAlias {
    pub fn new(alias_id: impl Into<String>, asset_ids: &[&str]) -> Self {
        Self {
            alias_id: alias_id.into(),
            events: asset_ids.iter().map(|id| EventRef::new(*id)).collect(),
        }
    }
}

/// Reference into the event table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRef {
    #[serde(default)]
    pub asset_id: Option<String>,
}

impl EventRef {
    pub fn new(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: Some(asset_id.into()),
        }
    }

    /// The referenced asset id, if present and non-empty
    pub fn asset_id(&self) -> Option<&str> {
        self.asset_id.as_deref().filter(|id| !id.is_empty())
    }
}

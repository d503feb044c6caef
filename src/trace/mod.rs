//! Upstream trace forest handling
//!
//! Holds the tree returned by the trace service and collects the asset ids
//! needed to hydrate it. Parent aliases are deduplicated per request through
//! [`ParentAliasIndex`].

mod alias_index;
mod collector;
mod models;

pub use alias_index::ParentAliasIndex;
pub use collector::{collect_asset_ids, collect_forest_assets};
pub use models::{EventRef, ParentAlias, TraceNode};

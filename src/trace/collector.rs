//! Asset collection over the trace forest
//!
//! Gathers every asset id that has to be hydrated before rows can be built.
//! Node-level references are collected here; alias contributions go through
//! the [`ParentAliasIndex`] so they are derived once per alias id.

use std::collections::BTreeSet;

use crate::trace::alias_index::ParentAliasIndex;
use crate::trace::models::TraceNode;

/// Collect asset ids referenced by a node and all of its ingredients
///
/// Parent aliases are not visited.
pub fn collect_asset_ids(node: &TraceNode) -> BTreeSet<String> {
    let mut assets = BTreeSet::new();
    collect_into(node, &mut assets);
    assets
}

fn collect_into(node: &TraceNode, assets: &mut BTreeSet<String>) {
    assets.extend(node.asset_ids().map(str::to_string));
    for input in &node.input_nodes {
        collect_into(input, assets);
    }
}

/// Collect the full hydration set for a trace forest
///
/// Node-level references of every root are unioned with every alias
/// contribution reachable anywhere in the forest. The alias index is filled
/// as a side effect and must be kept for the rest of the request.
pub fn collect_forest_assets(
    roots: &[TraceNode],
    aliases: &mut ParentAliasIndex,
) -> BTreeSet<String> {
    let mut assets = BTreeSet::new();
    for root in roots {
        collect_into(root, &mut assets);
    }
    for root in roots {
        assets.extend(aliases.collect(root));
    }

    tracing::debug!(
        "Collected {} asset ids from {} trace root(s), {} parent alias(es)",
        assets.len(),
        roots.len(),
        aliases.len()
    );

    assets
}

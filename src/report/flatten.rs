//! Flattening of ingredient trees into report rows
//!
//! Every node below a traced product becomes one row. Rows start from the
//! product's template (product identity and final location) and add only
//! the ingredient's own identity and source location.

use crate::master_data::MasterData;
use crate::report::row::{Column, ReportRow};
use crate::resolve::{resolve_final, resolve_source};
use crate::trace::TraceNode;

/// Builds report rows from trace trees over one request's master data
pub struct RowFlattener<'a> {
    data: &'a MasterData,
}

impl<'a> RowFlattener<'a> {
    pub fn new(data: &'a MasterData) -> Self {
        Self { data }
    }

    /// Rows for every root, in forest order
    pub fn expand_all(&self, roots: &[TraceNode]) -> Vec<ReportRow> {
        roots.iter().flat_map(|root| self.expand(root)).collect()
    }

    /// Rows for one traced product
    ///
    /// A product with no ingredients yields a single row carrying its own
    /// source location. Otherwise each node of the ingredient subtree yields
    /// one row.
    pub fn expand(&self, root: &TraceNode) -> Vec<ReportRow> {
        let hydrated = self.data.node_events(root);
        let product = self.data.product_match(&root.item_id, hydrated.org_id);

        let mut template = ReportRow::new();
        template.set(Column::ProductEpc, Some(root.item_id.clone()));
        template.set(Column::ProductGtin, product.gtin);
        template.set(Column::ProductName, product.name);
        template.set_final_location(resolve_final(&hydrated.events, self.data.locations()));

        if root.input_nodes.is_empty() {
            template.set_source_location(resolve_source(&hydrated.events, self.data.locations()));
            return vec![template];
        }

        let mut rows = Vec::with_capacity(root.descendant_count());
        self.ingredient_rows(&template, &root.input_nodes, &mut rows);

        tracing::debug!("Expanded {} into {} row(s)", root.item_id, rows.len());
        rows
    }

    /// Emit a row per ingredient, depth first
    ///
    /// Deeper ingredients branch from the same template, so a row never
    /// carries an intermediate ingredient's fields.
    fn ingredient_rows(&self, template: &ReportRow, inputs: &[TraceNode], rows: &mut Vec<ReportRow>) {
        for input in inputs {
            let hydrated = self.data.node_events(input);
            let product = self.data.product_match(&input.item_id, hydrated.org_id);

            let mut row = template.clone();
            row.set(Column::IngredientEpc, Some(input.item_id.clone()));
            row.set(Column::IngredientGtin, product.gtin);
            row.set(Column::IngredientName, product.name);
            row.set_source_location(resolve_source(&hydrated.events, self.data.locations()));
            rows.push(row);

            self.ingredient_rows(template, &input.input_nodes, rows);
        }
    }
}

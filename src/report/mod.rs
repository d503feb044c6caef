//! Ingredient sourcing report
//!
//! Row building lives in `flatten.rs`; this module holds the request outcome
//! and its rendering for the CSV writer.

mod flatten;
mod row;

pub use flatten::RowFlattener;
pub use row::{Column, ReportRow, format_timestamp};

use serde_json::Value;

/// Advisory shown instead of rows when a request traces too many items
pub const DATASET_TOO_LARGE: &str =
    "Dataset returned is too large. Try narrowing your search using the date filters.";

/// Outcome of one ingredient sourcing request
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientReport {
    /// Normal result; may hold zero rows
    Rows(Vec<ReportRow>),
    /// Too many items were traced; no rows were built
    TooLarge { traced_items: usize, limit: usize },
}

impl IngredientReport {
    /// A valid report with no rows
    pub fn empty() -> Self {
        IngredientReport::Rows(Vec::new())
    }

    pub fn rows(&self) -> &[ReportRow] {
        match self {
            IngredientReport::Rows(rows) => rows,
            IngredientReport::TooLarge { .. } => &[],
        }
    }

    pub fn is_too_large(&self) -> bool {
        matches!(self, IngredientReport::TooLarge { .. })
    }

    /// Header and value rows for a tabular renderer
    ///
    /// The too-large outcome has no headers and a single advisory row.
    pub fn table(&self) -> (Vec<String>, Vec<Vec<String>>) {
        match self {
            IngredientReport::Rows(rows) => (
                Column::headers(),
                rows.iter().map(ReportRow::values).collect(),
            ),
            IngredientReport::TooLarge { .. } => {
                (Vec::new(), vec![vec![DATASET_TOO_LARGE.to_string()]])
            }
        }
    }

    /// Render as CSV text, one line per row
    pub fn to_csv(&self) -> String {
        let (headers, rows) = self.table();
        let mut out = String::new();
        if !headers.is_empty() {
            out.push_str(&csv_line(&headers));
            out.push('\n');
        }
        for row in &rows {
            out.push_str(&csv_line(row));
            out.push('\n');
        }
        out
    }
}

/// Quote each value as a JSON string and join with commas
pub fn csv_line(values: &[String]) -> String {
    values
        .iter()
        .map(|v| Value::String(v.clone()).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

//! Report columns and rows

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

use crate::resolve::ResolvedLocation;

/// Report columns in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    ProductEpc,
    ProductName,
    ProductGtin,
    FinalLocationId,
    FinalLocationName,
    FinalLocationType,
    ArrivalDate,
    IngredientEpc,
    IngredientName,
    IngredientGtin,
    SourceLocationId,
    SourceLocationName,
    SourceLocationType,
    CreationDate,
}

impl Column {
    /// Every column, in output order
    pub const ALL: [Column; 14] = [
        Column::ProductEpc,
        Column::ProductName,
        Column::ProductGtin,
        Column::FinalLocationId,
        Column::FinalLocationName,
        Column::FinalLocationType,
        Column::ArrivalDate,
        Column::IngredientEpc,
        Column::IngredientName,
        Column::IngredientGtin,
        Column::SourceLocationId,
        Column::SourceLocationName,
        Column::SourceLocationType,
        Column::CreationDate,
    ];

    /// Get the header text
    pub fn header(&self) -> &'static str {
        match self {
            Column::ProductEpc => "Finished Product (EPC)",
            Column::ProductName => "Finished Product Name",
            Column::ProductGtin => "Finished Product GTIN",
            Column::FinalLocationId => "Final Location (GLN)",
            Column::FinalLocationName => "Final Location Name",
            Column::FinalLocationType => "Final Location Type",
            Column::ArrivalDate => "Arrival Date",
            Column::IngredientEpc => "Ingredient (EPC)",
            Column::IngredientName => "Ingredient Name",
            Column::IngredientGtin => "Ingredient GTIN",
            Column::SourceLocationId => "Source Location (GLN)",
            Column::SourceLocationName => "Source Location Name",
            Column::SourceLocationType => "Source Location Type",
            Column::CreationDate => "Creation Date",
        }
    }

    /// Header texts for every column, in output order
    pub fn headers() -> Vec<String> {
        Self::ALL.iter().map(|c| c.header().to_string()).collect()
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// Render a timestamp the way the trace service reports it
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One denormalized report row; absent values render empty
///
/// Rows derived from a template are clones with some fields overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ReportRow {
    values: [Option<String>; 14],
}

impl ReportRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.values[column.index()].as_deref()
    }

    pub fn set(&mut self, column: Column, value: Option<String>) {
        self.values[column.index()] = value;
    }

    /// Fill the final location columns
    pub fn set_final_location(&mut self, resolved: ResolvedLocation) {
        self.set(Column::ArrivalDate, resolved.time.as_ref().map(format_timestamp));
        self.set(Column::FinalLocationId, resolved.location_id);
        self.set(Column::FinalLocationName, resolved.name);
        self.set(Column::FinalLocationType, resolved.role_type);
    }

    /// Fill the source location columns
    pub fn set_source_location(&mut self, resolved: ResolvedLocation) {
        self.set(Column::CreationDate, resolved.time.as_ref().map(format_timestamp));
        self.set(Column::SourceLocationId, resolved.location_id);
        self.set(Column::SourceLocationName, resolved.name);
        self.set(Column::SourceLocationType, resolved.role_type);
    }

    /// Values aligned with [`Column::ALL`]
    pub fn values(&self) -> Vec<String> {
        self.values
            .iter()
            .map(|v| v.clone().unwrap_or_default())
            .collect()
    }
}

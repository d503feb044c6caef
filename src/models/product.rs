//! Product master data

use serde::{Deserialize, Serialize};

/// A product master record
///
/// Several organizations may each own a record for the same GTIN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "id")]
    pub gtin: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "org_id", default)]
    pub owner_org_id: Option<String>,
}

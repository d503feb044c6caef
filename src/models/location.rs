//! Location master data

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Controlled vocabulary for the role a physical location plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationRole {
    Store,
    DistributionCenter,
    Supplier,
    Farm,
}

impl LocationRole {
    /// Get the party role code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationRole::Store => "STORE",
            LocationRole::DistributionCenter => "DISTRIBUTION_CENTER",
            LocationRole::Supplier => "SUPPLIER",
            LocationRole::Farm => "FARM",
        }
    }

    /// Try to parse a role code, returning None for codes outside the vocabulary
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl fmt::Display for LocationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LocationRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STORE" => Ok(LocationRole::Store),
            "DISTRIBUTION_CENTER" => Ok(LocationRole::DistributionCenter),
            "SUPPLIER" => Ok(LocationRole::Supplier),
            "FARM" => Ok(LocationRole::Farm),
            _ => Err(format!("Unknown location role: {}", s)),
        }
    }
}

/// A location master record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    #[serde(rename = "party_name", default)]
    pub name: Option<String>,
    /// Raw role code, kept verbatim so unknown codes still render
    #[serde(rename = "party_role_code", default)]
    pub role_type: Option<String>,
    #[serde(default)]
    pub org_id: Option<String>,
}

impl Location {
    pub fn role(&self) -> Option<LocationRole> {
        self.role_type.as_deref().and_then(LocationRole::parse_optional)
    }
}

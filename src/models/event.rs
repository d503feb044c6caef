//! Event records returned by the trace service
//!
//! One record per asset id. Records are fetched once per request and are
//! never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of event recorded against one or more item tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Aggregation,
    Observation,
    Commission,
    Transformation,
    Disaggregation,
    Deletion,
    /// Any event type this crate does not know about
    #[serde(other)]
    Other,
}

impl EventType {
    /// Get the wire name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Aggregation => "aggregation",
            EventType::Observation => "observation",
            EventType::Commission => "commission",
            EventType::Transformation => "transformation",
            EventType::Disaggregation => "disaggregation",
            EventType::Deletion => "deletion",
            EventType::Other => "other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aggregation" => Ok(EventType::Aggregation),
            "observation" => Ok(EventType::Observation),
            "commission" => Ok(EventType::Commission),
            "transformation" => Ok(EventType::Transformation),
            "disaggregation" => Ok(EventType::Disaggregation),
            "deletion" => Ok(EventType::Deletion),
            _ => Err(format!("Unknown event type: {}", s)),
        }
    }
}

/// A hydrated event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub asset_id: String,
    #[serde(default)]
    pub org_id: Option<String>,
    /// Where the event physically happened
    #[serde(default)]
    pub biz_location_id: Option<String>,
    #[serde(default)]
    pub source_location_ids: Vec<String>,
    #[serde(default)]
    pub destination_location_ids: Vec<String>,
    pub event_time: DateTime<Utc>,
    pub event_type: EventType,
    #[serde(default)]
    pub biz_step: Option<String>,
    /// Item tags the event was recorded against
    #[serde(rename = "epcs_ids", default)]
    pub item_tags: Vec<String>,
}

impl Event {
    /// Every location id this event mentions, biz location first
    pub fn location_ids(&self) -> impl Iterator<Item = &str> {
        self.biz_location_id
            .iter()
            .chain(self.source_location_ids.iter())
            .chain(self.destination_location_ids.iter())
            .map(String::as_str)
    }
}

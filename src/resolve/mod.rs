//! Location resolution
//!
//! Reduces the events of one item to a single canonical location and
//! timestamp. Every choice is an order-stable comparison: a later candidate
//! replaces the current pick only when it is strictly better, so equal
//! candidates resolve to the first one encountered.
//!
//! "Final" resolution looks at the latest event and favors retail-like
//! endpoints; "source" resolution looks at the earliest event and favors
//! origin-like endpoints.

use chrono::{DateTime, Utc};

use crate::master_data::LocationTable;
use crate::models::{Event, EventType, LocationRole};

/// Location priority when resolving where an item ended up
pub const FINAL_LOCATION_PRIORITY: [LocationRole; 4] = [
    LocationRole::Store,
    LocationRole::DistributionCenter,
    LocationRole::Supplier,
    LocationRole::Farm,
];

/// Location priority when resolving where an item came from
pub const SOURCE_LOCATION_PRIORITY: [LocationRole; 4] = [
    LocationRole::Farm,
    LocationRole::Supplier,
    LocationRole::DistributionCenter,
    LocationRole::Store,
];

/// Event type priority for earliest events sharing a timestamp
pub const SOURCE_EVENT_PRIORITY: [EventType; 3] = [
    EventType::Aggregation,
    EventType::Observation,
    EventType::Commission,
];

/// One resolved location; every field is None when there was nothing to resolve
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedLocation {
    pub time: Option<DateTime<Utc>>,
    pub location_id: Option<String>,
    pub name: Option<String>,
    pub role_type: Option<String>,
}

/// Index of `value` in `order`; values not listed rank after every listed one
fn rank<T: PartialEq>(order: &[T], value: Option<&T>) -> usize {
    value
        .and_then(|v| order.iter().position(|o| o == v))
        .unwrap_or(order.len())
}

/// Resolve the final location of an item from its latest event
///
/// Candidates are the event's biz location followed by its destinations.
pub fn resolve_final(events: &[&Event], locations: &LocationTable) -> ResolvedLocation {
    let Some(latest) = events
        .iter()
        .copied()
        .reduce(|best, event| if event.event_time > best.event_time { event } else { best })
    else {
        return ResolvedLocation::default();
    };

    let candidates = latest
        .biz_location_id
        .iter()
        .chain(latest.destination_location_ids.iter());
    pick_location(latest, candidates, &FINAL_LOCATION_PRIORITY, locations)
}

/// Resolve the source location of an item from its earliest event
///
/// Events sharing the earliest timestamp are ordered by event type
/// priority. Candidates are the event's biz location followed by its sources.
pub fn resolve_source(events: &[&Event], locations: &LocationTable) -> ResolvedLocation {
    let Some(earliest) = events.iter().copied().reduce(|best, event| {
        let earlier = event.event_time < best.event_time;
        let tie_preferred = event.event_time == best.event_time
            && rank(&SOURCE_EVENT_PRIORITY, Some(&event.event_type))
                < rank(&SOURCE_EVENT_PRIORITY, Some(&best.event_type));
        if earlier || tie_preferred { event } else { best }
    }) else {
        return ResolvedLocation::default();
    };

    let candidates = earliest
        .biz_location_id
        .iter()
        .chain(earliest.source_location_ids.iter());
    pick_location(earliest, candidates, &SOURCE_LOCATION_PRIORITY, locations)
}

/// Reduce candidate location ids to one by role priority
///
/// Ids with no master record keep their id but carry no name or role, and
/// rank lowest.
fn pick_location<'a>(
    event: &Event,
    candidates: impl Iterator<Item = &'a String>,
    priority: &[LocationRole],
    locations: &LocationTable,
) -> ResolvedLocation {
    let mut best: Option<(usize, &String)> = None;
    for id in candidates {
        let role = locations.get(id).and_then(|location| location.role());
        let id_rank = rank(priority, role.as_ref());
        if best.is_none_or(|(best_rank, _)| id_rank < best_rank) {
            best = Some((id_rank, id));
        }
    }

    let Some((_, id)) = best else {
        return ResolvedLocation {
            time: Some(event.event_time),
            ..Default::default()
        };
    };

    let location = locations.get(id);
    ResolvedLocation {
        time: Some(event.event_time),
        location_id: Some(id.clone()),
        name: location.and_then(|l| l.name.clone()),
        role_type: location.and_then(|l| l.role_type.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 6, 1, hour, 0, 0).unwrap()
    }

    fn event(
        asset_id: &str,
        hour: u32,
        event_type: EventType,
        biz: &str,
        sources: &[&str],
        dests: &[&str],
    ) -> Event {
        Event {
            asset_id: asset_id.to_string(),
            org_id: None,
            biz_location_id: Some(biz.to_string()),
            source_location_ids: sources.iter().map(|s| s.to_string()).collect(),
            destination_location_ids: dests.iter().map(|s| s.to_string()).collect(),
            event_time: at(hour),
            event_type,
            biz_step: None,
            item_tags: Vec::new(),
        }
    }

    fn location(id: &str, role: &str) -> Location {
        Location {
            id: id.to_string(),
            name: Some(format!("{} name", id)),
            role_type: Some(role.to_string()),
            org_id: None,
        }
    }

    fn table() -> LocationTable {
        [
            location("store", "STORE"),
            location("dc", "DISTRIBUTION_CENTER"),
            location("supplier", "SUPPLIER"),
            location("farm", "FARM"),
            location("plant", "PROCESSOR"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_empty_events_resolve_to_nothing() {
        let locations = table();
        assert_eq!(resolve_final(&[], &locations), ResolvedLocation::default());
        assert_eq!(resolve_source(&[], &locations), ResolvedLocation::default());
    }

    #[test]
    fn test_final_uses_latest_event() {
        let early = event("a", 1, EventType::Observation, "farm", &[], &[]);
        let late = event("b", 5, EventType::Observation, "dc", &[], &[]);
        let resolved = resolve_final(&[&early, &late], &table());

        assert_eq!(resolved.location_id.as_deref(), Some("dc"));
        assert_eq!(resolved.time, Some(at(5)));
        assert_eq!(resolved.role_type.as_deref(), Some("DISTRIBUTION_CENTER"));
    }

    #[test]
    fn test_final_event_tie_keeps_first() {
        let first = event("a", 5, EventType::Observation, "dc", &[], &[]);
        let second = event("b", 5, EventType::Observation, "store", &[], &[]);
        let resolved = resolve_final(&[&first, &second], &table());
        assert_eq!(resolved.location_id.as_deref(), Some("dc"));
    }

    #[test]
    fn test_final_prefers_store_regardless_of_order() {
        let locations = table();
        let a = event("a", 5, EventType::Observation, "supplier", &[], &["store", "dc"]);
        let b = event("b", 5, EventType::Observation, "dc", &[], &["supplier", "store"]);

        assert_eq!(
            resolve_final(&[&a], &locations).location_id.as_deref(),
            Some("store")
        );
        assert_eq!(
            resolve_final(&[&b], &locations).location_id.as_deref(),
            Some("store")
        );
    }

    #[test]
    fn test_final_ignores_source_locations() {
        let e = event("a", 5, EventType::Observation, "supplier", &["store"], &[]);
        let resolved = resolve_final(&[&e], &table());
        assert_eq!(resolved.location_id.as_deref(), Some("supplier"));
    }

    #[test]
    fn test_source_prefers_farm_regardless_of_order() {
        let locations = table();
        let a = event("a", 1, EventType::Commission, "store", &["farm", "supplier"], &[]);
        let b = event("b", 1, EventType::Commission, "farm", &["supplier", "store"], &[]);

        assert_eq!(
            resolve_source(&[&a], &locations).location_id.as_deref(),
            Some("farm")
        );
        assert_eq!(
            resolve_source(&[&b], &locations).location_id.as_deref(),
            Some("farm")
        );
    }

    #[test]
    fn test_source_uses_earliest_event() {
        let late = event("a", 9, EventType::Observation, "store", &[], &[]);
        let early = event("b", 2, EventType::Observation, "supplier", &[], &[]);
        let resolved = resolve_source(&[&late, &early], &table());

        assert_eq!(resolved.location_id.as_deref(), Some("supplier"));
        assert_eq!(resolved.time, Some(at(2)));
    }

    #[test]
    fn test_source_time_tie_breaks_on_event_type() {
        let commission = event("a", 2, EventType::Commission, "farm", &[], &[]);
        let observation = event("b", 2, EventType::Observation, "dc", &[], &[]);
        let aggregation = event("c", 2, EventType::Aggregation, "supplier", &[], &[]);

        let resolved = resolve_source(&[&commission, &observation, &aggregation], &table());
        assert_eq!(resolved.location_id.as_deref(), Some("supplier"));

        let resolved = resolve_source(&[&commission, &observation], &table());
        assert_eq!(resolved.location_id.as_deref(), Some("dc"));
    }

    #[test]
    fn test_source_unlisted_event_type_ranks_last() {
        let other = event("a", 2, EventType::Transformation, "farm", &[], &[]);
        let commission = event("b", 2, EventType::Commission, "store", &[], &[]);
        let resolved = resolve_source(&[&other, &commission], &table());
        assert_eq!(resolved.location_id.as_deref(), Some("store"));

        let other_again = event("c", 2, EventType::Other, "dc", &[], &[]);
        let resolved = resolve_source(&[&other, &other_again], &table());
        assert_eq!(resolved.location_id.as_deref(), Some("farm"));
    }

    #[test]
    fn test_unknown_role_and_missing_master_rank_last() {
        let locations = table();
        let e = event("a", 1, EventType::Observation, "plant", &[], &["unknown-id", "farm"]);
        let resolved = resolve_final(&[&e], &locations);
        assert_eq!(resolved.location_id.as_deref(), Some("farm"));

        let e = event("b", 1, EventType::Observation, "unknown-id", &[], &["plant"]);
        let resolved = resolve_final(&[&e], &locations);
        assert_eq!(resolved.location_id.as_deref(), Some("unknown-id"));
        assert_eq!(resolved.name, None);
        assert_eq!(resolved.role_type, None);
        assert_eq!(resolved.time, Some(at(1)));
    }

    #[test]
    fn test_event_without_locations_keeps_time() {
        let mut e = event("a", 3, EventType::Observation, "x", &[], &[]);
        e.biz_location_id = None;
        let resolved = resolve_source(&[&e], &table());
        assert_eq!(resolved.time, Some(at(3)));
        assert_eq!(resolved.location_id, None);
    }
}

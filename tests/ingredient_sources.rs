//! Ingredient sources pipeline tests
//!
//! The trace backend is mocked with mockall for guardrail and failure cases,
//! and served from a fixture file for the end-to-end run.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockall::mock;
use recall_trace::models::{Event, EventType, Location, Product};
use recall_trace::report::DATASET_TOO_LARGE;
use recall_trace::services::{FileTraceService, TraceDirection};
use recall_trace::{Column, IngredientReport, IngredientSources, TraceFilter, TraceNode, TraceService};
use serde_json::json;
use std::io::Write;

mock! {
    pub Trace {}

    #[async_trait]
    impl TraceService for Trace {
        async fn fetch_lots_and_serials(&self, filter: &TraceFilter) -> anyhow::Result<Vec<String>>;
        async fn run_trace(
            &self,
            filter: &TraceFilter,
            item_ids: &[String],
            direction: TraceDirection,
        ) -> anyhow::Result<Vec<TraceNode>>;
        async fn fetch_events(&self, filter: &TraceFilter, asset_ids: &[String]) -> anyhow::Result<Vec<Event>>;
        async fn fetch_locations(
            &self,
            filter: &TraceFilter,
            location_ids: &[String],
        ) -> anyhow::Result<Vec<Location>>;
        async fn fetch_products(&self, filter: &TraceFilter, gtins: &[String]) -> anyhow::Result<Vec<Product>>;
    }
}

const SALAD: &str = "urn:epc:id:sgtin:0614141.812345.1";

fn lots(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("urn:epc:id:sgtin:0614141.812345.{}", i))
        .collect()
}

fn pack_event() -> Event {
    Event {
        asset_id: "ev-pack".to_string(),
        org_id: None,
        biz_location_id: Some("loc-plant".to_string()),
        source_location_ids: Vec::new(),
        destination_location_ids: Vec::new(),
        event_time: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        event_type: EventType::Commission,
        biz_step: None,
        item_tags: vec![SALAD.to_string()],
    }
}

/// Mock that serves one traced item with a single event
fn single_item_mock(item_count: usize) -> MockTrace {
    let mut mock = MockTrace::new();
    mock.expect_fetch_lots_and_serials()
        .times(1)
        .returning(move |_| Ok(lots(item_count)));
    mock.expect_run_trace()
        .withf(|_, _, direction| *direction == TraceDirection::Upstream)
        .times(1)
        .returning(|_, _, _| Ok(vec![TraceNode::new(SALAD, &["ev-pack"])]));
    mock.expect_fetch_events()
        .times(1)
        .returning(|_, _| Ok(vec![pack_event()]));
    mock
}

#[tokio::test]
async fn test_too_many_items_returns_advisory() {
    let mut mock = MockTrace::new();
    mock.expect_fetch_lots_and_serials()
        .times(1)
        .returning(|_| Ok(lots(51)));
    mock.expect_run_trace().never();
    mock.expect_fetch_events().never();

    let report = IngredientSources::new(Box::new(mock))
        .report(&TraceFilter::new("80614141123458"))
        .await
        .unwrap();

    assert!(report.is_too_large());
    assert!(report.rows().is_empty());
    let (headers, rows) = report.table();
    assert!(headers.is_empty());
    assert_eq!(rows, vec![vec![DATASET_TOO_LARGE.to_string()]]);
}

#[tokio::test]
async fn test_item_count_at_limit_is_expanded() {
    let mut mock = single_item_mock(50);
    mock.expect_fetch_locations()
        .times(1)
        .returning(|_, ids| {
            assert_eq!(ids, ["loc-plant".to_string()]);
            Ok(Vec::new())
        });
    mock.expect_fetch_products()
        .times(1)
        .returning(|_, gtins| {
            assert_eq!(gtins, ["80614141123458".to_string()]);
            Ok(vec![Product {
                gtin: "80614141123458".to_string(),
                description: Some("Chopped Salad".to_string()),
                owner_org_id: None,
            }])
        });

    let report = IngredientSources::new(Box::new(mock))
        .report(&TraceFilter::new("80614141123458"))
        .await
        .unwrap();

    assert!(!report.is_too_large());
    assert_eq!(report.rows().len(), 1);
    let row = &report.rows()[0];
    assert_eq!(row.get(Column::ProductName), Some("Chopped Salad"));
    assert_eq!(row.get(Column::SourceLocationId), Some("loc-plant"));
}

#[tokio::test]
async fn test_configured_limit_applies() {
    let mut mock = MockTrace::new();
    mock.expect_fetch_lots_and_serials()
        .returning(|_| Ok(lots(3)));
    mock.expect_run_trace().never();

    let report = IngredientSources::new(Box::new(mock))
        .with_max_traced_items(2)
        .report(&TraceFilter::new("p"))
        .await
        .unwrap();

    assert_eq!(
        report,
        IngredientReport::TooLarge {
            traced_items: 3,
            limit: 2
        }
    );
}

#[tokio::test]
async fn test_no_items_is_an_empty_report() {
    let mut mock = MockTrace::new();
    mock.expect_fetch_lots_and_serials()
        .returning(|_| Ok(Vec::new()));
    mock.expect_run_trace().never();

    let report = IngredientSources::new(Box::new(mock))
        .report(&TraceFilter::new("p"))
        .await
        .unwrap();

    assert_eq!(report, IngredientReport::empty());
    let (headers, rows) = report.table();
    assert_eq!(headers, Column::headers());
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_empty_trace_is_an_empty_report() {
    let mut mock = MockTrace::new();
    mock.expect_fetch_lots_and_serials()
        .returning(|_| Ok(lots(1)));
    mock.expect_run_trace()
        .times(1)
        .returning(|_, _, _| Ok(Vec::new()));
    mock.expect_fetch_events().never();
    mock.expect_fetch_locations().never();
    mock.expect_fetch_products().never();

    let report = IngredientSources::new(Box::new(mock))
        .report(&TraceFilter::new("p"))
        .await
        .unwrap();

    assert_eq!(report, IngredientReport::empty());
}

#[tokio::test]
async fn test_master_data_failure_aborts_request() {
    let mut mock = single_item_mock(1);
    mock.expect_fetch_locations()
        .returning(|_, _| Err(anyhow::anyhow!("location service unavailable")));
    mock.expect_fetch_products()
        .returning(|_, _| Ok(Vec::new()));

    let err = IngredientSources::new(Box::new(mock))
        .report(&TraceFilter::new("p"))
        .await
        .unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("Failed to fetch locations"), "{}", message);
    assert!(message.contains("location service unavailable"), "{}", message);
}

#[tokio::test]
async fn test_trace_failure_aborts_request() {
    let mut mock = MockTrace::new();
    mock.expect_fetch_lots_and_serials()
        .returning(|_| Ok(lots(1)));
    mock.expect_run_trace()
        .returning(|_, _, _| Err(anyhow::anyhow!("timeout")));
    mock.expect_fetch_events().never();

    let err = IngredientSources::new(Box::new(mock))
        .report(&TraceFilter::new("p"))
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to run upstream trace"));
}

#[tokio::test]
async fn test_fixture_end_to_end() {
    let fixture = json!({
        "lots_and_serials": { "80614141123458": [SALAD] },
        "trace": [{
            "epc_id": SALAD,
            "events": [{ "asset_id": "ev-pack" }, { "asset_id": "ev-arrival" }],
            "input_epcs": [{
                "epc_id": "urn:epc:class:lgtin:4012345.012345.LOT1",
                "events": [{ "asset_id": "ev-harvest" }, { "asset_id": "" }],
                "parent_epcs": [{
                    "epc_id": "urn:epc:id:sscc:0614141.0000000001",
                    "events": [{ "asset_id": "ev-pallet" }]
                }]
            }]
        }],
        "events": [
            {
                "asset_id": "ev-pack",
                "biz_location_id": "loc-plant",
                "event_time": "2020-01-01T08:00:00.000Z",
                "event_type": "commission",
                "epcs_ids": [SALAD]
            },
            {
                "asset_id": "ev-arrival",
                "biz_location_id": "loc-dc",
                "destination_location_ids": ["loc-store"],
                "event_time": "2020-01-05T12:30:00.000Z",
                "event_type": "observation",
                "epcs_ids": [SALAD]
            },
            {
                "asset_id": "ev-harvest",
                "biz_location_id": "loc-packer",
                "event_time": "2019-12-01T06:00:00.000Z",
                "event_type": "observation",
                "epcs_ids": ["urn:epc:class:lgtin:4012345.012345.LOT1"]
            },
            {
                "asset_id": "ev-pallet",
                "biz_location_id": "loc-packer",
                "source_location_ids": ["loc-farm"],
                "event_time": "2019-12-01T06:00:00.000Z",
                "event_type": "aggregation",
                "epcs_ids": ["urn:epc:id:sscc:0614141.0000000001"]
            }
        ],
        "locations": [
            { "id": "loc-plant", "party_name": "Salad Plant", "party_role_code": "SUPPLIER" },
            { "id": "loc-dc", "party_name": "Central DC", "party_role_code": "DISTRIBUTION_CENTER" },
            { "id": "loc-store", "party_name": "Store 12", "party_role_code": "STORE" },
            { "id": "loc-packer", "party_name": "Valley Packers", "party_role_code": "SUPPLIER" },
            { "id": "loc-farm", "party_name": "Green Acres", "party_role_code": "FARM" }
        ],
        "products": [
            { "id": "80614141123458", "description": "Chopped Salad" },
            { "id": "04012345123456", "description": "Romaine Lettuce" }
        ]
    });

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(fixture.to_string().as_bytes()).unwrap();

    let sources = IngredientSources::new(Box::new(FileTraceService::new(file.path())));
    let report = sources
        .report(&TraceFilter::new("80614141123458"))
        .await
        .unwrap();

    let rows = report.rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get(Column::ProductName), Some("Chopped Salad"));
    assert_eq!(row.get(Column::FinalLocationName), Some("Store 12"));
    assert_eq!(row.get(Column::ArrivalDate), Some("2020-01-05T12:30:00.000Z"));
    assert_eq!(row.get(Column::IngredientGtin), Some("04012345123456"));
    // The pallet aggregation ties the harvest and wins on event type
    assert_eq!(row.get(Column::SourceLocationId), Some("loc-farm"));
    assert_eq!(row.get(Column::SourceLocationType), Some("FARM"));
    assert_eq!(row.get(Column::CreationDate), Some("2019-12-01T06:00:00.000Z"));
}

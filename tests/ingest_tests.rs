//! Planner response ingestion tests
//!
//! Matching, grouping, day ordering and route decoding over a flat schedule.

mod fixtures;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use itinerary_planner::error::Diagnostic;
use itinerary_planner::model::{Category, Itinerary, PlaceId, LAST_STOP_LABEL};
use itinerary_planner::pipeline::{ItineraryBuilder, TripRequest};
use itinerary_planner::route::{decode_interleaved, interleave};
use itinerary_planner::schedule::{PayloadPlace, ScheduleResponse, SchedulePayload};
use itinerary_planner::store::PlaceStore;

use fixtures::all_places;

// ============================================================================
// Helpers
// ============================================================================

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
}

fn store() -> PlaceStore {
    all_places().into_iter().collect()
}

fn response(json: &str) -> ScheduleResponse {
    serde_json::from_str(json).expect("valid schedule json")
}

fn undated() -> TripRequest {
    TripRequest::default()
}

fn arrivals(itinerary: &Itinerary, day: usize) -> Vec<NaiveTime> {
    itinerary.days[day].places.iter().map(|p| p.arrive_time).collect()
}

// ============================================================================
// Airport handling
// ============================================================================

#[test]
fn test_airport_first_item_uses_fixed_record() {
    let store = PlaceStore::new();
    let builder = ItineraryBuilder::new(&store);
    let schedule = response(
        r#"{"schedule": [
            {"place_name": "제주국제공항", "place_type": "etc", "time_block": "Mon_0900"},
            {"place_name": "Somewhere", "place_type": "attraction", "time_block": "Mon_1000"}
        ]}"#,
    );

    let itinerary = builder.ingest(&undated(), None, &schedule).unwrap();
    let first = &itinerary.days[0].places[0];

    assert_eq!(first.place.name, "제주국제공항");
    assert_eq!(first.place.category, Category::Transport);
    assert!(!first.is_fallback);
    assert!(first.place.coordinates().is_some());
}

// ============================================================================
// Matching and grouping
// ============================================================================

#[test]
fn test_repeated_slots_become_one_stay() {
    let store = store();
    let builder = ItineraryBuilder::new(&store);
    let schedule = response(
        r#"{"schedule": [
            {"id": 202, "place_name": "Seongsan Ilchulbong", "place_type": "attraction", "time_block": "Mon_0900"},
            {"id": "202", "place_name": "Seongsan Ilchulbong", "place_type": "attraction", "time_block": "Mon_1000"},
            {"id": 402, "place_name": "Seongsan Ocean View Cafe", "place_type": "cafe", "time_block": "Mon_1100"},
            {"id": 201, "place_name": "Manjanggul Cave", "place_type": "attraction", "time_block": "Mon_1200"}
        ]}"#,
    );

    let itinerary = builder.ingest(&undated(), None, &schedule).unwrap();
    let day = &itinerary.days[0];

    assert_eq!(day.places.len(), 3);
    assert_eq!(day.places[0].entry_id, "202_1_0");
    assert_eq!(day.places[0].stay_duration_minutes, 120);
    assert_eq!(day.places[0].depart_time, NaiveTime::from_hms_opt(11, 0, 0).unwrap());
    assert_eq!(day.places[1].entry_id, "402_1_2");
    assert_eq!(day.places[2].travel_time_to_next_label, LAST_STOP_LABEL);
    assert!(day.total_distance_km > 0.0);
    assert!(itinerary.diagnostics.is_empty());
}

#[test]
fn test_unknown_item_degrades_to_fallback() {
    let store = store();
    let builder = ItineraryBuilder::new(&store);
    let schedule = response(
        r#"{"schedule": [
            {"id": 300, "place_name": "Dongmun Market", "place_type": "restaurant", "time_block": "Tue_1200"},
            {"place_name": "Closed Teahouse", "place_type": "카페", "time_block": "Tue_1300"},
            {"id": 200, "place_name": "Yongduam Rock", "place_type": "attraction", "time_block": "Tue_1400"}
        ]}"#,
    );

    let itinerary = builder.ingest(&undated(), None, &schedule).unwrap();
    let day = &itinerary.days[0];

    assert_eq!(day.places.len(), 3);
    assert!(day.places[1].is_fallback);
    assert_eq!(day.places[1].place.category, Category::Cafe);
    // Fallback has no coordinates, so no travel estimate around it
    assert_eq!(day.places[0].travel_time_to_next_label, "N/A");
    assert_eq!(
        itinerary.diagnostics,
        vec![Diagnostic::UnresolvedPlace {
            name: "Closed Teahouse".to_string(),
            time_block: "Tue_1300".to_string(),
        }]
    );
}

#[test]
fn test_payload_hints_recover_renamed_place() {
    let store = store();
    let builder = ItineraryBuilder::new(&store);
    let payload = SchedulePayload {
        selected_places: vec![PayloadPlace {
            id: PlaceId::from_int(203),
            name: "협재해수욕장".to_string(),
        }],
        candidate_places: Vec::new(),
        start_datetime: at(6, 9),
        end_datetime: at(6, 18),
    };
    let schedule = response(
        r#"{"schedule": [
            {"place_name": "협재해수욕장", "place_type": "attraction", "time_block": "Mon_0900"}
        ]}"#,
    );

    let itinerary = builder.ingest(&undated(), Some(&payload), &schedule).unwrap();

    assert_eq!(itinerary.days[0].places[0].place.name, "Hyeopjae Beach");
    assert!(!itinerary.days[0].places[0].is_fallback);
}

// ============================================================================
// Day ordering
// ============================================================================

#[test]
fn test_weekday_labels_follow_trip_dates() {
    let store = store();
    let builder = ItineraryBuilder::new(&store);
    // 2024-05-10 is a Friday; the planner labels days by weekday
    let trip = TripRequest::new(Vec::new(), at(10, 9), at(12, 18));
    let schedule = response(
        r#"{"schedule": [
            {"id": 200, "place_name": "Yongduam Rock", "time_block": "Sun_0900"},
            {"id": 201, "place_name": "Manjanggul Cave", "time_block": "Fri_0900"},
            {"id": 202, "place_name": "Seongsan Ilchulbong", "time_block": "Sat_0900"}
        ]}"#,
    );

    let itinerary = builder.ingest(&trip, None, &schedule).unwrap();

    let labels: Vec<(u32, &str, Option<&str>)> = itinerary
        .days
        .iter()
        .map(|d| (d.day, d.day_of_week.as_str(), d.date.as_deref()))
        .collect();
    assert_eq!(
        labels,
        vec![(1, "Fri", Some("05/10")), (2, "Sat", Some("05/11")), (3, "Sun", Some("05/12"))]
    );
    assert_eq!(itinerary.days[0].places[0].place.name, "Manjanggul Cave");
}

#[test]
fn test_long_trip_flags_label_collisions() {
    let store = store();
    let builder = ItineraryBuilder::new(&store);
    let trip = TripRequest::new(Vec::new(), at(6, 9), at(15, 18));
    let schedule = response(
        r#"{"schedule": [{"id": 200, "place_name": "Yongduam Rock", "time_block": "Mon_0900"}]}"#,
    );

    let itinerary = builder.ingest(&trip, None, &schedule).unwrap();

    assert_eq!(itinerary.days.len(), 1);
    assert!(itinerary
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::DayKeyCollision { key, .. } if key == "Mon")));
}

// ============================================================================
// Routes
// ============================================================================

#[test]
fn test_route_summary_attached_per_day() {
    let store = store();
    let builder = ItineraryBuilder::new(&store);
    let schedule = response(
        r#"{
            "schedule": [
                {"id": 200, "place_name": "Yongduam Rock", "time_block": "Mon_0900"},
                {"id": 300, "place_name": "Dongmun Market", "time_block": "Mon_1000"},
                {"id": 204, "place_name": "Cheonjiyeon Falls", "time_block": "Tue_0900"}
            ],
            "route_summary": [
                {"day": "Tue", "places_routed": ["Cheonjiyeon Falls"], "interleaved_route": [], "total_distance_m": 0},
                {"day": "Mon", "places_routed": ["Yongduam Rock", "Dongmun Market"],
                 "interleaved_route": [5001, 7001, 5002, 7002, 5003], "total_distance_m": 3120}
            ]
        }"#,
    );

    let itinerary = builder.ingest(&undated(), None, &schedule).unwrap();
    let monday = itinerary.day(1).unwrap();

    assert_eq!(monday.route_data.node_ids, vec!["5001", "5002", "5003"]);
    assert_eq!(monday.route_data.link_ids, vec!["7001", "7002"]);
    assert_eq!(monday.route_data.total_distance_km, 3.12);
    assert_eq!(monday.route_data.places_routed.len(), 2);
    assert_eq!(monday.route_data.segment_routes.len(), 1);
    assert_eq!(monday.interleaved_route.len(), 5);

    let tuesday = itinerary.day(2).unwrap();
    assert!(tuesday.route_data.node_ids.is_empty());
    assert_eq!(tuesday.total_distance_km, 0.0);
}

#[test]
fn test_out_of_order_slots_are_sorted_before_grouping() {
    let store = store();
    let builder = ItineraryBuilder::new(&store);
    let schedule = response(
        r#"{"schedule": [
            {"id": 202, "place_name": "Seongsan Ilchulbong", "place_type": "attraction", "time_block": "Mon_1100"},
            {"id": 402, "place_name": "Seongsan Ocean View Cafe", "place_type": "cafe", "time_block": "Mon_0900"},
            {"id": 202, "place_name": "Seongsan Ilchulbong", "place_type": "attraction", "time_block": "Mon_1200"}
        ]}"#,
    );

    let itinerary = builder.ingest(&undated(), None, &schedule).unwrap();
    let day = &itinerary.days[0];

    let times = arrivals(&itinerary, 0);
    assert!(times.windows(2).all(|pair| pair[0] <= pair[1]), "{:?}", times);
    assert_eq!(day.places.len(), 2);
    assert_eq!(day.places[0].entry_id, "402_1_0");
    assert_eq!(day.places[1].entry_id, "202_1_1");
    assert_eq!(day.places[1].stay_duration_minutes, 120);
    assert_eq!(day.places[1].travel_time_to_next_label, LAST_STOP_LABEL);
}

#[test]
fn test_route_round_trip() {
    let nodes: Vec<String> = (0..6).map(|i| format!("n{}", i)).collect();
    let links: Vec<String> = (0..6).map(|i| format!("l{}", i)).collect();

    let decoded = decode_interleaved(&interleave(&nodes, &links));

    assert_eq!(decoded.node_ids, nodes);
    assert_eq!(decoded.link_ids, links);
}

#[test]
fn test_route_round_trip_across_lengths() {
    for count in 0..8usize {
        let nodes: Vec<String> = (0..count).map(|i| format!("n{}", i)).collect();
        let short: Vec<String> = (0..count.saturating_sub(1)).map(|i| format!("l{}", i)).collect();
        let equal: Vec<String> = (0..count).map(|i| format!("l{}", i)).collect();

        // Odd length: starts and ends on a node
        let route = interleave(&nodes, &short);
        assert_eq!(route.len(), nodes.len() + short.len());
        let decoded = decode_interleaved(&route);
        assert_eq!(decoded.node_ids, nodes);
        assert_eq!(decoded.link_ids, short);

        // Even length: ends on a link
        let decoded = decode_interleaved(&interleave(&nodes, &equal));
        assert_eq!(decoded.node_ids, nodes);
        assert_eq!(decoded.link_ids, equal);
    }
}

#[test]
fn test_interleave_appends_surplus_ids() {
    let nodes = vec!["n0".to_string(), "n1".to_string(), "n2".to_string()];
    let links = vec!["l0".to_string()];

    assert_eq!(interleave(&nodes, &links), vec!["n0", "l0", "n1", "n2"]);
    assert_eq!(interleave(&links, &[]), vec!["l0"]);
}

//! End-to-end tests for the matcher → segmenter pipeline.
//!
//! Builds a small surveillance-style scenario and checks that repeated
//! encounters survive the full flow while one-off encounters are dropped.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use cooc_core::{
    EntityId, Event, EventId, LocationId, MatchConfig, SegmentConfig, divide_cooccurrences,
    find_cooccurrences, partition_cooccurrences,
};

fn ts(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("valid test timestamp")
        + Duration::minutes(minutes)
}

fn event(id: &str, entity: &str, at: DateTime<Utc>) -> Event {
    Event::new(
        EventId::new(id).unwrap(),
        EntityId::new(entity).unwrap(),
        at,
    )
}

fn located(id: &str, entity: &str, at: DateTime<Utc>, location: &str) -> Event {
    event(id, entity, at).at_location(LocationId::new(location).unwrap())
}

/// alice and bob meet in the morning and again in the afternoon; carol
/// passes bob exactly once. With a 2h minimum gap, only alice-bob remains.
#[test]
fn repeated_encounters_survive_the_pipeline() {
    let events = vec![
        // Morning encounter: two co-occurrences minutes apart.
        event("a1", "alice", ts(0)),
        event("b1", "bob", ts(0) + Duration::seconds(20)),
        event("a2", "alice", ts(5)),
        event("b2", "bob", ts(5) + Duration::seconds(40)),
        // carol passes bob once around 10:00.
        event("c1", "carol", ts(60)),
        event("b3", "bob", ts(60) + Duration::seconds(10)),
        // Afternoon encounter, six hours after the morning one.
        event("a3", "alice", ts(360)),
        event("b4", "bob", ts(360) + Duration::seconds(15)),
    ];

    let matched = find_cooccurrences(&events, &MatchConfig::new(60_000)).unwrap();
    // Three alice-bob co-occurrences plus the single bob-carol one.
    assert_eq!(matched.len(), 4);

    let two_hours_ms = 2 * 60 * 60 * 1000;
    let partition =
        partition_cooccurrences(matched, &SegmentConfig::new(two_hours_ms)).unwrap();

    assert_eq!(partition.recurring.len(), 3);
    assert!(
        partition
            .recurring
            .iter()
            .all(|r| r.entity_pair().to_string() == "alice<->bob")
    );
    assert_eq!(partition.incidental.len(), 1);
    assert_eq!(
        partition.incidental[0].entity_pair().to_string(),
        "bob<->carol"
    );
}

/// The same scenario through the retained-only entry point.
#[test]
fn divide_returns_only_the_recurring_records() {
    let events = vec![
        event("a1", "alice", ts(0)),
        event("b1", "bob", ts(0) + Duration::seconds(20)),
        event("c1", "carol", ts(60)),
        event("b2", "bob", ts(60) + Duration::seconds(10)),
        event("a2", "alice", ts(360)),
        event("b3", "bob", ts(360) + Duration::seconds(15)),
    ];

    let matched = find_cooccurrences(&events, &MatchConfig::new(60_000)).unwrap();
    let retained =
        divide_cooccurrences(matched, &SegmentConfig::new(2 * 60 * 60 * 1000)).unwrap();

    assert_eq!(retained.len(), 2);
    assert!(retained.iter().all(|r| r.entity_pair().to_string() == "alice<->bob"));
    // Ordered by time within the pair.
    assert!(retained[0].time() < retained[1].time());
}

/// Location-constrained matching only pairs events at the same place, and
/// the shared location plus event attributes flow through to the output.
#[test]
fn location_constrained_pipeline_carries_metadata() {
    let mut tagged = located("a1", "alice", ts(0), "station-north");
    tagged.attributes.insert("camera".to_string(), json!("cam-03"));

    let events = vec![
        tagged,
        located("b1", "bob", ts(0) + Duration::seconds(30), "station-north"),
        // Same time window, wrong place.
        located("c1", "carol", ts(0) + Duration::seconds(10), "station-south"),
        // Second encounter at the same place, hours later.
        located("a2", "alice", ts(300), "station-north"),
        located("b2", "bob", ts(300) + Duration::seconds(5), "station-north"),
    ];

    let config = MatchConfig {
        max_gap_ms: 60_000,
        same_location: true,
    };
    let matched = find_cooccurrences(&events, &config).unwrap();
    assert_eq!(matched.len(), 2);

    let retained = divide_cooccurrences(matched, &SegmentConfig::new(60 * 60 * 1000)).unwrap();
    assert_eq!(retained.len(), 2);
    assert_eq!(
        retained[0].location,
        Some(LocationId::new("station-north").unwrap())
    );
    assert_eq!(retained[0].event.attributes.get("camera"), Some(&json!("cam-03")));
}

/// Empty input flows through both stages without error.
#[test]
fn empty_input_flows_through() {
    let matched = find_cooccurrences(&[], &MatchConfig::new(60_000)).unwrap();
    let retained = divide_cooccurrences(matched, &SegmentConfig::new(10_000)).unwrap();
    assert!(retained.is_empty());
}

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;

use scheduling_cell::models::{EventType, Urgency};
use scheduling_cell::services::enrichment::{
    enrich, event_icon, event_purpose, rank, select_for_display, urgency_for, DISPLAY_MAX,
};
use scheduling_cell::services::availability::process_slots;

const TZ: Tz = chrono_tz::America::Chicago;

fn wednesday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 4, 15, 0, 0).unwrap()
}

fn event_type(id: i64, title: &str, length: i32, hidden: bool) -> EventType {
    EventType {
        id,
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        description: None,
        length,
        booking_url: format!("https://cal.com/tester/{id}"),
        hidden,
        metadata: None,
    }
}

#[test]
fn duration_overrides_keyword_icon_mapping() {
    assert_eq!(event_icon("Photo Session", 15), "⚡");
    assert_eq!(event_icon("Quick Check-in", 60), "🏗️");
}

#[test]
fn keyword_icon_mapping_at_mid_durations() {
    assert_eq!(event_icon("Photo Session", 30), "📸");
    assert_eq!(event_icon("Quick Check-in", 30), "🎯");
    assert_eq!(event_icon("Architecture Review", 45), "🏗️");
    assert_eq!(event_icon("Strategy Call", 30), "💼");
}

#[test]
fn purpose_lookup_matches_title_keywords() {
    assert!(event_purpose("Quick Check-in").contains("Initial questions"));
    assert!(event_purpose("Architecture Review").contains("Technical deep-dive"));
    assert!(event_purpose("Photography Session").contains("photography"));
    assert!(event_purpose("Consulting Call").contains("Strategic planning"));
    assert_eq!(event_purpose("Something Else"), "Professional consultation");
}

#[test]
fn urgency_high_on_scarce_week() {
    let slots = process_slots(&[wednesday_morning() + Duration::days(3)], wednesday_morning(), TZ, 3);
    assert_eq!(urgency_for(&slots, 2), Urgency::High);
}

#[test]
fn urgency_high_when_first_slot_is_today() {
    let now = wednesday_morning();
    let slots = process_slots(&[now + Duration::hours(2)], now, TZ, 3);
    assert_eq!(urgency_for(&slots, 8), Urgency::High);
}

#[test]
fn urgency_medium_then_low_by_count() {
    let now = wednesday_morning();
    let slots = process_slots(&[now + Duration::days(3)], now, TZ, 3);
    assert_eq!(urgency_for(&slots, 5), Urgency::Medium);
    assert_eq!(urgency_for(&slots, 8), Urgency::Low);
}

#[test]
fn enrich_caps_availability_at_three() {
    let now = wednesday_morning();
    let raw: Vec<_> = (1..=8).map(|d| now + Duration::days(d % 5 + 1)).collect();
    let mut sorted = raw.clone();
    sorted.sort_unstable();

    let enriched = enrich(event_type(1, "Strategy Call", 30, false), &sorted, sorted.len(), now, TZ);

    assert_eq!(enriched.availability.len(), 3);
}

#[test]
fn rank_orders_by_urgency_then_duration_then_slot_count() {
    let now = wednesday_morning();
    let far = vec![now + Duration::days(3)];
    let far_two = vec![now + Duration::days(3), now + Duration::days(4)];

    // low urgency (count 8), 30 min
    let low = enrich(event_type(1, "Strategy Call", 30, false), &far, 8, now, TZ);
    // high urgency (count 2), 45 min
    let high = enrich(event_type(2, "Architecture Review", 45, false), &far, 2, now, TZ);
    // medium urgency (count 5), 30 min, one slot
    let medium_short = enrich(event_type(3, "Intro Call", 30, false), &far, 5, now, TZ);
    // medium urgency (count 5), 45 min
    let medium_long = enrich(event_type(4, "Deep Dive", 45, false), &far, 5, now, TZ);
    // medium urgency (count 5), 30 min, two slots
    let medium_busy = enrich(event_type(5, "Intro Call B", 30, false), &far_two, 5, now, TZ);

    let ranked = rank(vec![
        low.clone(),
        high.clone(),
        medium_long.clone(),
        medium_short.clone(),
        medium_busy.clone(),
    ]);

    let ids: Vec<i64> = ranked.iter().map(|et| et.event_type.id).collect();
    // high first; among mediums the 30-minute ones beat the 45-minute one and
    // the two-slot one beats the one-slot one; low last.
    assert_eq!(ids, vec![2, 5, 3, 4, 1]);
}

#[test]
fn rank_is_deterministic_across_repeated_calls() {
    let now = wednesday_morning();
    let far = vec![now + Duration::days(3)];

    let input: Vec<_> = (1..=6)
        .map(|i| enrich(event_type(i, "Strategy Call", 30, false), &far, 8, now, TZ))
        .collect();

    let first: Vec<i64> = rank(input.clone()).iter().map(|et| et.event_type.id).collect();
    let second: Vec<i64> = rank(input).iter().map(|et| et.event_type.id).collect();

    assert_eq!(first, second);
}

#[test]
fn display_selection_drops_hidden_and_empty_and_caps_at_three() {
    let now = wednesday_morning();
    let far = vec![now + Duration::days(3)];

    let mut input = vec![
        enrich(event_type(1, "Hidden Call", 30, true), &far, 8, now, TZ),
        enrich(event_type(2, "No Slots", 30, false), &[], 0, now, TZ),
    ];
    for i in 3..=7 {
        input.push(enrich(event_type(i, "Strategy Call", 30, false), &far, 8, now, TZ));
    }

    let display = select_for_display(input, DISPLAY_MAX);

    assert_eq!(display.len(), 3);
    assert!(display.iter().all(|et| !et.event_type.hidden));
    assert!(display.iter().all(|et| !et.availability.is_empty()));
}

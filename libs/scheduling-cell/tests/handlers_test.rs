use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{Duration, Utc};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scheduling_cell::handlers::{
    get_availability, get_event_types, get_suggestion, SchedulingState, SuggestionQuery,
};
use scheduling_cell::models::AvailabilityState;
use shared_config::AppConfig;
use shared_models::error::AppError;

fn test_config(base_url: String) -> AppConfig {
    AppConfig {
        cal_api_key: "test-key".to_string(),
        cal_api_base_url: base_url,
        cal_booking_origin: "https://cal.com".to_string(),
        cal_username: "tester".to_string(),
        cal_webhook_secret: String::new(),
        blog_manifest_origin: String::new(),
        display_timezone: chrono_tz::America::Chicago,
        port: 3000,
    }
}

fn test_state(base_url: String) -> Arc<SchedulingState> {
    Arc::new(SchedulingState::new(Arc::new(test_config(base_url))))
}

async fn mount_event_types(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/event-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "eventTypeGroups": [{
                    "eventTypes": [{
                        "id": 101,
                        "title": "Quick Check-in",
                        "slug": "quick-check-in",
                        "description": null,
                        "length": 15,
                        "hidden": false
                    }]
                }]
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn availability_reports_slots_from_the_provider() {
    let server = MockServer::start().await;
    mount_event_types(&server).await;

    let now = Utc::now();
    let slots: Vec<_> = (1..=6)
        .map(|d| json!({ "start": (now + Duration::days(d)).to_rfc3339() }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/slots"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "upcoming": slots } })),
        )
        .mount(&server)
        .await;

    let (headers, Json(status)) = get_availability(State(test_state(server.uri()))).await;

    assert_eq!(headers[0].1, "public, max-age=900");
    assert_eq!(status.slots_this_week, 6);
    assert_eq!(status.status, AvailabilityState::Available);
    assert!(status.next_slot.is_some());
}

#[tokio::test]
async fn availability_with_no_event_types_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/event-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "eventTypeGroups": [] }
        })))
        .mount(&server)
        .await;

    let (_, Json(status)) = get_availability(State(test_state(server.uri()))).await;

    assert_eq!(status.status, AvailabilityState::Unavailable);
    assert_eq!(status.message, "Currently unavailable");
    assert!(status.next_slot.is_none());
}

#[tokio::test]
async fn availability_without_credentials_degrades_gracefully() {
    let mut config = test_config("http://127.0.0.1:1".to_string());
    config.cal_api_key = String::new();
    let state = Arc::new(SchedulingState::new(Arc::new(config)));

    let (_, Json(status)) = get_availability(State(state)).await;

    // Never a 5xx for this read; a neutral limited status instead.
    assert_eq!(status.status, AvailabilityState::Limited);
    assert!(status.next_slot.is_none());
    assert_eq!(status.slots_this_week, 0);
}

#[tokio::test]
async fn event_types_endpoint_returns_enriched_cards() {
    let server = MockServer::start().await;
    mount_event_types(&server).await;

    let now = Utc::now();
    Mock::given(method("GET"))
        .and(path("/slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "upcoming": [
                    { "start": (now + Duration::days(1)).to_rfc3339() },
                    { "start": (now + Duration::days(2)).to_rfc3339() }
                ]
            }
        })))
        .mount(&server)
        .await;

    let (headers, Json(cards)) = get_event_types(State(test_state(server.uri()))).await;

    assert_eq!(headers[0].1, "public, max-age=300");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].event_type.id, 101);
    assert_eq!(cards[0].icon, "⚡");
    assert!(!cards[0].availability.is_empty());
}

#[tokio::test]
async fn event_types_endpoint_degrades_to_an_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/event-types"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (_, Json(cards)) = get_event_types(State(test_state(server.uri()))).await;
    assert!(cards.is_empty());
}

#[tokio::test]
async fn suggestion_requires_a_session_id() {
    let state = test_state("http://127.0.0.1:1".to_string());
    let query = SuggestionQuery {
        slots: 2,
        next_slot: None,
        last_visit: None,
    };

    let result = get_suggestion(State(state), HeaderMap::new(), Query(query)).await;

    assert_matches!(result, Err(AppError::BadRequest(_)));
}

#[tokio::test]
async fn suggestion_is_shown_at_most_once_per_session() {
    let state = test_state("http://127.0.0.1:1".to_string());
    let mut headers = HeaderMap::new();
    headers.insert("x-session-id", "session-a".parse().unwrap());

    let query = || SuggestionQuery {
        slots: 2,
        next_slot: None,
        last_visit: None,
    };

    let (_, Json(first)) = get_suggestion(State(state.clone()), headers.clone(), Query(query()))
        .await
        .unwrap();
    let (_, Json(second)) = get_suggestion(State(state), headers, Query(query()))
        .await
        .unwrap();

    assert!(first.is_some());
    assert!(second.is_none());
}

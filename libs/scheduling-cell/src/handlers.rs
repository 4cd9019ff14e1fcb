// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    Json,
};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Deserialize;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AvailabilityState, AvailabilityStatus, EnrichedEventType, SmartSuggestion};
use crate::services::availability::{aggregate, week_window};
use crate::services::client::CalClient;
use crate::services::enrichment::{enrich, select_for_display, DISPLAY_MAX};
use crate::services::suggestions::{build_context, evaluate, SuggestionSessions};

/// Shared state for the scheduling cell. The suggestion session set outlives
/// individual requests; the provider client is cheap and built per request.
pub struct SchedulingState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<SuggestionSessions>,
}

impl SchedulingState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            sessions: Arc::new(SuggestionSessions::new()),
        }
    }
}

const AVAILABILITY_CACHE: (header::HeaderName, &str) =
    (header::CACHE_CONTROL, "public, max-age=900");
const EVENT_TYPES_CACHE: (header::HeaderName, &str) =
    (header::CACHE_CONTROL, "public, max-age=300");

/// GET /availability - weekly availability summary for the portfolio section.
///
/// Provider failures never surface as a 5xx here; the client degrades them to
/// empty lists and this handler answers with a neutral status instead.
pub async fn get_availability(
    State(state): State<Arc<SchedulingState>>,
) -> ([(header::HeaderName, &'static str); 1], Json<AvailabilityStatus>) {
    if !state.config.is_cal_configured() {
        return ([AVAILABILITY_CACHE], Json(AvailabilityStatus::degraded()));
    }

    let client = CalClient::new(&state.config);
    let now = Utc::now();
    let tz = state.config.display_timezone;

    let (schedules, event_types) =
        tokio::join!(client.fetch_schedules(), client.fetch_event_types());
    debug!(
        "Fetched {} schedules and {} event types",
        schedules.len(),
        event_types.len()
    );

    if event_types.is_empty() {
        return (
            [AVAILABILITY_CACHE],
            Json(AvailabilityStatus {
                status: AvailabilityState::Unavailable,
                next_slot: None,
                message: "Currently unavailable".to_string(),
                slots_this_week: 0,
            }),
        );
    }

    let (start, end) = week_window(now);
    let slot_lists = join_all(
        event_types
            .iter()
            .filter(|et| !et.hidden)
            .map(|et| client.fetch_slots(et.id, start, end)),
    )
    .await;

    let mut all_slots: Vec<DateTime<Utc>> = slot_lists.into_iter().flatten().collect();
    all_slots.sort_unstable();

    let status = aggregate(&all_slots, all_slots.len(), now, tz);
    ([AVAILABILITY_CACHE], Json(status))
}

/// GET /event-types - ranked, enriched event-type cards (max 3).
pub async fn get_event_types(
    State(state): State<Arc<SchedulingState>>,
) -> (
    [(header::HeaderName, &'static str); 1],
    Json<Vec<EnrichedEventType>>,
) {
    let client = CalClient::new(&state.config);
    let now = Utc::now();
    let tz = state.config.display_timezone;

    let event_types = client.fetch_event_types().await;
    if event_types.is_empty() {
        return ([EVENT_TYPES_CACHE], Json(Vec::new()));
    }

    let (start, end) = week_window(now);
    let visible: Vec<_> = event_types.into_iter().filter(|et| !et.hidden).collect();

    let slot_lists = join_all(
        visible
            .iter()
            .map(|et| client.fetch_slots(et.id, start, end)),
    )
    .await;

    let enriched: Vec<EnrichedEventType> = visible
        .into_iter()
        .zip(slot_lists)
        .map(|(et, slots)| enrich(et, &slots, slots.len(), now, tz))
        .collect();

    (
        [EVENT_TYPES_CACHE],
        Json(select_for_display(enriched, DISPLAY_MAX)),
    )
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    /// Available slots this week, as seen by the caller.
    pub slots: usize,
    /// Earliest upcoming slot, if any.
    pub next_slot: Option<DateTime<Utc>>,
    /// Caller's last visit as Unix epoch milliseconds.
    pub last_visit: Option<i64>,
}

/// GET /suggestion - at most one contextual booking nudge per session.
///
/// The session key comes from the `X-Session-Id` header; visit history stays
/// client-tracked and arrives as query parameters.
pub async fn get_suggestion(
    State(state): State<Arc<SchedulingState>>,
    headers: HeaderMap,
    Query(query): Query<SuggestionQuery>,
) -> Result<
    (
        [(header::HeaderName, &'static str); 1],
        Json<Option<SmartSuggestion>>,
    ),
    AppError,
> {
    let session_key = headers
        .get("x-session-id")
        .and_then(|value| value.to_str().ok())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing X-Session-Id header".to_string()))?;

    let now = Utc::now();
    let tz = state.config.display_timezone;
    let last_visit = query.last_visit.and_then(DateTime::from_timestamp_millis);

    let context = build_context(query.slots, query.next_slot, last_visit, now, tz);
    let suggestion = evaluate(&state.sessions, session_key, &context, now);

    Ok(([(header::CACHE_CONTROL, "no-store")], Json(suggestion)))
}

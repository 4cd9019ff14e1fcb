// libs/scheduling-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// PROVIDER-FACING MODELS
// ==============================================================================

/// A bookable meeting template as exposed by the scheduling provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    /// Duration in minutes.
    pub length: i32,
    pub booking_url: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub availability: Vec<ScheduleWindow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWindow {
    pub days: Vec<u8>,
    /// "HH:MM" in the schedule's timezone.
    pub start_time: String,
    pub end_time: String,
}

// ==============================================================================
// AVAILABILITY MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityState {
    Available,
    Limited,
    Unavailable,
}

impl fmt::Display for AvailabilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityState::Available => write!(f, "available"),
            AvailabilityState::Limited => write!(f, "limited"),
            AvailabilityState::Unavailable => write!(f, "unavailable"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextAvailableSlot {
    pub date_time: DateTime<Utc>,
    /// Human-readable relative form, e.g. "Today at 2:00 PM".
    pub display_time: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityStatus {
    pub status: AvailabilityState,
    pub next_slot: Option<NextAvailableSlot>,
    pub message: String,
    pub slots_this_week: usize,
}

impl AvailabilityStatus {
    /// Degraded response served when the provider cannot be reached.
    /// Always 200 with a neutral message, never a 5xx.
    pub fn degraded() -> Self {
        Self {
            status: AvailabilityState::Limited,
            next_slot: None,
            message: "Check calendar for availability".to_string(),
            slots_this_week: 0,
        }
    }
}

/// A single bookable start time enriched for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub date_time: DateTime<Utc>,
    pub display_time: String,
    pub is_today: bool,
    pub is_tomorrow: bool,
}

// ==============================================================================
// ENRICHMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    /// Sort key: high sorts before medium sorts before low.
    pub fn rank(self) -> u8 {
        match self {
            Urgency::High => 0,
            Urgency::Medium => 1,
            Urgency::Low => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedEventType {
    #[serde(flatten)]
    pub event_type: EventType,
    /// At most three upcoming slots, sorted ascending.
    pub availability: Vec<AvailabilitySlot>,
    pub icon: String,
    pub purpose: String,
    pub urgency: Urgency,
}

// ==============================================================================
// SUGGESTION MODELS
// ==============================================================================

/// Snapshot of caller state used to derive a contextual booking suggestion.
#[derive(Debug, Clone)]
pub struct BookingContext {
    pub user_timezone: String,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u32,
    /// 0..=23, local to the display timezone.
    pub hour_of_day: u32,
    pub last_visit: Option<DateTime<Utc>>,
    pub available_slots: usize,
    pub has_afternoon_slots: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartSuggestion {
    pub message: String,
    pub urgency: Urgency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<SuggestionAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionAction {
    pub label: String,
    pub event_type_id: i64,
}

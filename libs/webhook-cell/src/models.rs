// libs/webhook-cell/src/models.rs
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookTrigger {
    #[serde(rename = "BOOKING_CREATED")]
    BookingCreated,
    #[serde(rename = "BOOKING_RESCHEDULED")]
    BookingRescheduled,
    #[serde(rename = "BOOKING_CANCELLED")]
    BookingCancelled,
}

/// Inbound booking lifecycle event from the scheduling provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub trigger: WebhookTrigger,
    pub booking: Booking,
    pub event_type: WebhookEventType,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub uid: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<String>,
    pub event_type_id: i64,
}

/// The slice of the event-type payload the processor cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEventType {
    pub id: i64,
    pub title: String,
}

/// Running counters over booking lifecycle events. Memory-only; a process
/// restart resets everything to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingMetrics {
    pub total_bookings: u64,
    pub bookings_by_type: HashMap<i64, u64>,
    pub last_booking_time: Option<DateTime<Utc>>,
}

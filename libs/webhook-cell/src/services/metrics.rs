// libs/webhook-cell/src/services/metrics.rs
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::models::{BookingMetrics, WebhookEvent, WebhookTrigger};

/// Store abstraction over the booking counters. The webhook handler only
/// depends on this trait, so the in-memory store can later be swapped for a
/// durable backend without touching the handler contract.
#[async_trait]
pub trait MetricsStore: Send + Sync {
    async fn apply(&self, event: &WebhookEvent);
    async fn snapshot(&self) -> BookingMetrics;
}

/// Process-lifetime counters behind a mutex. Concurrent webhook deliveries
/// serialize here so increments are never lost.
#[derive(Default)]
pub struct InMemoryMetricsStore {
    metrics: Mutex<BookingMetrics>,
}

impl InMemoryMetricsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetricsStore for InMemoryMetricsStore {
    async fn apply(&self, event: &WebhookEvent) {
        let Ok(mut metrics) = self.metrics.lock() else {
            return;
        };

        match event.trigger {
            WebhookTrigger::BookingCreated => {
                metrics.total_bookings += 1;
                metrics.last_booking_time = Some(Utc::now());
                *metrics
                    .bookings_by_type
                    .entry(event.booking.event_type_id)
                    .or_insert(0) += 1;

                info!(
                    event_type = %event.event_type.title,
                    start_time = %event.booking.start_time,
                    "Booking created"
                );
            }
            WebhookTrigger::BookingRescheduled => {
                // No counter changes; the new time is only recorded in the log.
                info!(
                    event_type = %event.event_type.title,
                    new_time = %event.booking.start_time,
                    "Booking rescheduled"
                );
            }
            WebhookTrigger::BookingCancelled => {
                metrics.total_bookings = metrics.total_bookings.saturating_sub(1);

                info!(
                    event_type = %event.event_type.title,
                    original_time = %event.booking.start_time,
                    "Booking cancelled"
                );
            }
        }
    }

    async fn snapshot(&self) -> BookingMetrics {
        self.metrics
            .lock()
            .map(|metrics| metrics.clone())
            .unwrap_or_default()
    }
}

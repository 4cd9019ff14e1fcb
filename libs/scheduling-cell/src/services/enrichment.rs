// libs/scheduling-cell/src/services/enrichment.rs
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::models::{AvailabilitySlot, EnrichedEventType, EventType, Urgency};
use crate::services::availability::{process_slots, SLOT_DISPLAY_LIMIT};

/// Default number of event-type cards shown on the page.
pub const DISPLAY_MAX: usize = 3;

/// Map an event title and duration to a display icon. Duration overrides the
/// keyword lookup at the extremes.
pub fn event_icon(title: &str, duration_minutes: i32) -> &'static str {
    let title = title.to_lowercase();

    if duration_minutes <= 15 {
        return "⚡";
    }
    if duration_minutes >= 60 {
        return "🏗️";
    }

    if title.contains("photo") {
        return "📸";
    }
    if title.contains("quick") || title.contains("check") {
        return "🎯";
    }
    if title.contains("architecture") || title.contains("review") {
        return "🏗️";
    }

    "💼"
}

/// Map an event title to a one-line purpose description.
pub fn event_purpose(title: &str) -> &'static str {
    let title = title.to_lowercase();

    if title.contains("quick") || title.contains("check-in") {
        return "Perfect for: Initial questions, project fit discussion";
    }
    if title.contains("architecture") || title.contains("review") {
        return "Perfect for: Technical deep-dive, platform strategy";
    }
    if title.contains("photo") || title.contains("photography") {
        return "Perfect for: Tournament coverage, team photography";
    }
    if title.contains("consultation") || title.contains("consulting") {
        return "Perfect for: Strategic planning, enterprise guidance";
    }

    "Professional consultation"
}

/// Urgency for an event-type card: high on near exhaustion or a same-day
/// first slot, medium when the week is thinning out, low otherwise.
pub fn urgency_for(slots: &[AvailabilitySlot], weekly_count: usize) -> Urgency {
    if weekly_count <= 2 {
        return Urgency::High;
    }
    if slots.first().is_some_and(|slot| slot.is_today) {
        return Urgency::High;
    }
    if weekly_count <= 5 {
        return Urgency::Medium;
    }
    Urgency::Low
}

/// Attach display metadata and processed slots to an event type.
pub fn enrich(
    event_type: EventType,
    raw_slots: &[DateTime<Utc>],
    weekly_count: usize,
    now: DateTime<Utc>,
    tz: Tz,
) -> EnrichedEventType {
    let slots = process_slots(raw_slots, now, tz, SLOT_DISPLAY_LIMIT);

    EnrichedEventType {
        icon: event_icon(&event_type.title, event_type.length).to_string(),
        purpose: event_purpose(&event_type.title).to_string(),
        urgency: urgency_for(&slots, weekly_count),
        availability: slots,
        event_type,
    }
}

/// Order event types for display: urgency first (high before low), then
/// shorter duration, then more remaining slots. The sort is stable, so equal
/// entries keep their input order and repeated calls are deterministic.
pub fn rank(mut event_types: Vec<EnrichedEventType>) -> Vec<EnrichedEventType> {
    event_types.sort_by(|a, b| {
        a.urgency
            .rank()
            .cmp(&b.urgency.rank())
            .then_with(|| a.event_type.length.cmp(&b.event_type.length))
            .then_with(|| b.availability.len().cmp(&a.availability.len()))
    });
    event_types
}

/// Rank, then drop hidden event types and those with no processed slots, and
/// cap the result at `max`.
pub fn select_for_display(
    event_types: Vec<EnrichedEventType>,
    max: usize,
) -> Vec<EnrichedEventType> {
    rank(event_types)
        .into_iter()
        .filter(|et| !et.event_type.hidden && !et.availability.is_empty())
        .take(max)
        .collect()
}

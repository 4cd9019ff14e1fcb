// libs/scheduling-cell/src/services/availability.rs
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::models::{AvailabilitySlot, AvailabilityState, AvailabilityStatus, NextAvailableSlot};

/// Display cap for per-event-type slot lists.
pub const SLOT_DISPLAY_LIMIT: usize = 3;

/// Weekly counts at or below this are reported as limited regardless of how
/// soon the first slot is. Scarcity dominates proximity.
const SCARCITY_THRESHOLD: usize = 3;

/// Format a timestamp relative to `now`, in the display timezone.
/// "In 25 minutes" / "Today at 2:00 PM" / "Tomorrow at 10:00 AM" /
/// "Thursday at 3:30 PM" / "Oct 4, 11:00 AM".
pub fn format_relative_time(slot: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> String {
    let local = slot.with_timezone(&tz);
    let now_local = now.with_timezone(&tz);
    let diff = slot - now;

    let time_str = local.format("%-I:%M %p").to_string();

    if local.date_naive() == now_local.date_naive() {
        if diff < Duration::hours(1) {
            return format!("In {} minutes", diff.num_minutes().max(0));
        }
        return format!("Today at {time_str}");
    }

    if local.date_naive() == now_local.date_naive() + Duration::days(1) {
        return format!("Tomorrow at {time_str}");
    }

    if diff <= Duration::days(7) {
        return format!("{} at {}", local.format("%A"), time_str);
    }

    local.format("%b %-d, %-I:%M %p").to_string()
}

/// Convert raw slot timestamps (already sorted ascending) into display slots,
/// capped at `limit`, with same-day/next-day flags against the server's
/// current date in the display timezone.
pub fn process_slots(
    raw_slots: &[DateTime<Utc>],
    now: DateTime<Utc>,
    tz: Tz,
    limit: usize,
) -> Vec<AvailabilitySlot> {
    let today = now.with_timezone(&tz).date_naive();
    let tomorrow = today + Duration::days(1);

    raw_slots
        .iter()
        .take(limit)
        .map(|&slot| {
            let slot_date = slot.with_timezone(&tz).date_naive();
            AvailabilitySlot {
                date_time: slot,
                display_time: format_relative_time(slot, now, tz),
                is_today: slot_date == today,
                is_tomorrow: slot_date == tomorrow,
            }
        })
        .collect()
}

/// Combine raw slot timestamps into a weekly availability summary.
///
/// `raw_slots` must be sorted ascending; the next slot is the earliest one at
/// or after `now`. When nothing is upcoming the status is unavailable and the
/// slot count is zero, so `next_slot` is `None` exactly when
/// `slots_this_week == 0`.
pub fn aggregate(
    raw_slots: &[DateTime<Utc>],
    total_this_week: usize,
    now: DateTime<Utc>,
    tz: Tz,
) -> AvailabilityStatus {
    let next = raw_slots.iter().copied().find(|&slot| slot >= now);

    let Some(next) = next else {
        return AvailabilityStatus {
            status: AvailabilityState::Unavailable,
            next_slot: None,
            message: "Fully booked this week".to_string(),
            slots_this_week: 0,
        };
    };

    let until_next = next - now;

    let (status, message) = if total_this_week <= SCARCITY_THRESHOLD {
        (
            AvailabilityState::Limited,
            format!(
                "Limited availability ({} slot{} left)",
                total_this_week,
                if total_this_week == 1 { "" } else { "s" }
            ),
        )
    } else if until_next <= Duration::hours(24) {
        (AvailabilityState::Available, "Available today".to_string())
    } else if until_next <= Duration::hours(168) {
        (AvailabilityState::Available, "Available this week".to_string())
    } else {
        (AvailabilityState::Limited, "Book ahead".to_string())
    };

    AvailabilityStatus {
        status,
        next_slot: Some(NextAvailableSlot {
            date_time: next,
            display_time: format_relative_time(next, now, tz),
            timestamp: next.timestamp_millis(),
        }),
        message,
        slots_this_week: total_this_week,
    }
}

/// The 7-day window availability reads cover, starting at `now`.
pub fn week_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (now, now + Duration::days(7))
}

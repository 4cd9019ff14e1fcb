// libs/scheduling-cell/src/services/suggestions.rs
use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use chrono_tz::Tz;

use crate::models::{BookingContext, SmartSuggestion, Urgency};

/// Session-scoped record of which callers have already been shown a
/// suggestion. A suggestion is emitted at most once per session key; repeated
/// evaluation afterward is idempotent and yields nothing.
#[derive(Default)]
pub struct SuggestionSessions {
    shown: Mutex<HashSet<String>>,
}

impl SuggestionSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_shown(&self, session_key: &str) -> bool {
        self.shown
            .lock()
            .map(|shown| shown.contains(session_key))
            .unwrap_or(false)
    }

    pub fn mark_shown(&self, session_key: &str) {
        if let Ok(mut shown) = self.shown.lock() {
            shown.insert(session_key.to_string());
        }
    }
}

/// Build a booking context from the server clock and caller-supplied state.
/// Day-of-week and hour are local to the display timezone.
pub fn build_context(
    available_slots: usize,
    next_slot: Option<DateTime<Utc>>,
    last_visit: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    tz: Tz,
) -> BookingContext {
    let now_local = now.with_timezone(&tz);
    let has_afternoon_slots = next_slot
        .map(|slot| slot.with_timezone(&tz).hour() >= 12)
        .unwrap_or(false);

    BookingContext {
        user_timezone: tz.name().to_string(),
        day_of_week: now_local.weekday().num_days_from_sunday(),
        hour_of_day: now_local.hour(),
        last_visit,
        available_slots,
        has_afternoon_slots,
    }
}

/// Derive a single contextual message from the booking context. Rules are
/// evaluated in priority order and the first match wins; when nothing fires
/// there is no suggestion.
pub fn generate(context: &BookingContext, now: DateTime<Utc>) -> Option<SmartSuggestion> {
    let slots = context.available_slots;

    // Very limited availability.
    if (1..=2).contains(&slots) {
        return Some(SmartSuggestion {
            message: format!(
                "Only {} slot{} left this week—book now",
                slots,
                if slots == 1 { "" } else { "s" }
            ),
            urgency: Urgency::High,
            action: None,
        });
    }

    // Friday afternoon: slots fill up over the weekend.
    if context.day_of_week == 5 && context.hour_of_day >= 14 {
        return Some(SmartSuggestion {
            message: "Monday slots filling fast—lock in your spot before the weekend".to_string(),
            urgency: Urgency::High,
            action: None,
        });
    }

    // Morning hours with afternoon availability.
    if context.hour_of_day < 10 && context.has_afternoon_slots {
        return Some(SmartSuggestion {
            message: "Book your afternoon slot before the lunch rush".to_string(),
            urgency: Urgency::Medium,
            action: None,
        });
    }

    // Returning visitor after a week away.
    if let Some(last_visit) = context.last_visit {
        if now - last_visit >= Duration::days(7) {
            return Some(SmartSuggestion {
                message: "New availability opened since your last visit".to_string(),
                urgency: Urgency::Medium,
                action: None,
            });
        }
    }

    // Limited but not critical.
    if (3..=5).contains(&slots) {
        return Some(SmartSuggestion {
            message: format!("{slots} slots available this week"),
            urgency: Urgency::Low,
            action: None,
        });
    }

    // Late in the week with plenty of slots: plan ahead.
    if context.day_of_week >= 4 && slots > 5 {
        return Some(SmartSuggestion {
            message: "Plan ahead—book your slot for next week".to_string(),
            urgency: Urgency::Low,
            action: None,
        });
    }

    None
}

/// Evaluate a suggestion under session suppression: nothing is returned for a
/// session that has already seen one, and a session is marked as soon as a
/// suggestion is produced for it.
pub fn evaluate(
    sessions: &SuggestionSessions,
    session_key: &str,
    context: &BookingContext,
    now: DateTime<Utc>,
) -> Option<SmartSuggestion> {
    if sessions.was_shown(session_key) {
        return None;
    }

    let suggestion = generate(context, now)?;
    sessions.mark_shown(session_key);
    Some(suggestion)
}

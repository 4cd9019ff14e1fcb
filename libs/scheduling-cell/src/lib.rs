pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

// Re-export commonly used types
pub use models::{
    AvailabilitySlot, AvailabilityState, AvailabilityStatus, BookingContext, EnrichedEventType,
    EventType, NextAvailableSlot, Schedule, SmartSuggestion, Urgency,
};

pub use handlers::SchedulingState;
pub use router::scheduling_routes;
pub use services::client::CalClient;

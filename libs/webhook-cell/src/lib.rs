pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

// Re-export commonly used types
pub use handlers::WebhookState;
pub use models::{Booking, BookingMetrics, WebhookEvent, WebhookEventType, WebhookTrigger};
pub use router::webhook_routes;
pub use services::metrics::{InMemoryMetricsStore, MetricsStore};
pub use services::signature::{compute_signature, verify_signature};

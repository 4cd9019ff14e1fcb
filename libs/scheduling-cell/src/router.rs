// libs/scheduling-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::{self, SchedulingState};

pub fn scheduling_routes(state: Arc<SchedulingState>) -> Router {
    Router::new()
        .route("/availability", get(handlers::get_availability))
        .route("/event-types", get(handlers::get_event_types))
        .route("/suggestion", get(handlers::get_suggestion))
        .with_state(state)
}

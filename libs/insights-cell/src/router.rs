// libs/insights-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::manifest::ManifestService;

pub fn insights_routes(service: Arc<ManifestService>) -> Router {
    Router::new()
        .route("/", get(handlers::get_latest))
        .route("/featured", get(handlers::get_featured))
        .with_state(service)
}

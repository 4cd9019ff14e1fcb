// libs/webhook-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handlers::{self, WebhookState};

pub fn webhook_routes(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::receive_webhook).get(handlers::get_metrics),
        )
        .with_state(state)
}

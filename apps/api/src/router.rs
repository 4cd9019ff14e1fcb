use std::sync::Arc;

use axum::{routing::get, Router};

use insights_cell::{insights_routes, ManifestService};
use scheduling_cell::{scheduling_routes, SchedulingState};
use shared_config::AppConfig;
use webhook_cell::{webhook_routes, InMemoryMetricsStore, WebhookState};

pub fn create_router(config: Arc<AppConfig>) -> Router {
    let scheduling = Arc::new(SchedulingState::new(config.clone()));
    let webhooks = Arc::new(WebhookState {
        config: config.clone(),
        metrics: Arc::new(InMemoryMetricsStore::new()),
    });
    let insights = Arc::new(ManifestService::new(&config));

    Router::new()
        .route("/", get(|| async { "Portfolio API is running!" }))
        .nest("/api", scheduling_routes(scheduling))
        .nest("/api/webhooks", webhook_routes(webhooks))
        .nest("/api/insights", insights_routes(insights))
}

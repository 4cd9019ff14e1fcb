// libs/webhook-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde_json::{json, Value};
use tracing::warn;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{BookingMetrics, WebhookEvent};
use crate::services::metrics::MetricsStore;
use crate::services::signature::verify_signature;

pub const SIGNATURE_HEADER: &str = "x-cal-signature";

pub struct WebhookState {
    pub config: Arc<AppConfig>,
    pub metrics: Arc<dyn MetricsStore>,
}

/// POST / - validate and apply an inbound booking lifecycle event.
///
/// Verification fails closed: with no secret configured every delivery is
/// rejected rather than accepted unverified. Signature and parse checks both
/// run before any counter is touched, so a rejected event never leaves
/// partial state behind.
pub async fn receive_webhook(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    if !state.config.is_webhook_configured() {
        warn!("CAL_WEBHOOK_SECRET not configured, rejecting webhook delivery");
        return Err(AppError::Auth(
            "Webhook signature verification is not configured".to_string(),
        ));
    }

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if !verify_signature(&body, signature, &state.config.cal_webhook_secret) {
        return Err(AppError::Auth("Invalid signature".to_string()));
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::Internal(format!("Malformed webhook payload: {e}")))?;

    state.metrics.apply(&event).await;

    Ok(Json(json!({ "received": true })))
}

/// GET / - current booking metrics, uncached.
pub async fn get_metrics(
    State(state): State<Arc<WebhookState>>,
) -> ([(header::HeaderName, &'static str); 1], Json<BookingMetrics>) {
    let metrics = state.metrics.snapshot().await;
    ([(header::CACHE_CONTROL, "no-store")], Json(metrics))
}

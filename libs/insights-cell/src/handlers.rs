// libs/insights-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    Json,
};
use serde::Deserialize;

use crate::models::InsightArticle;
use crate::services::manifest::ManifestService;

const INSIGHTS_CACHE: (header::HeaderName, &str) = (header::CACHE_CONTROL, "public, max-age=300");

const DEFAULT_LATEST_LIMIT: usize = 5;
const DEFAULT_FEATURED_LIMIT: usize = 1;

#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    pub limit: Option<usize>,
}

/// GET / - latest posts from the blog manifest, newest first.
pub async fn get_latest(
    State(service): State<Arc<ManifestService>>,
    Query(query): Query<InsightsQuery>,
) -> (
    [(header::HeaderName, &'static str); 1],
    Json<Vec<InsightArticle>>,
) {
    let limit = query.limit.unwrap_or(DEFAULT_LATEST_LIMIT);
    ([INSIGHTS_CACHE], Json(service.latest(limit).await))
}

/// GET /featured - featured posts only.
pub async fn get_featured(
    State(service): State<Arc<ManifestService>>,
    Query(query): Query<InsightsQuery>,
) -> (
    [(header::HeaderName, &'static str); 1],
    Json<Vec<InsightArticle>>,
) {
    let limit = query.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
    ([INSIGHTS_CACHE], Json(service.featured(limit).await))
}

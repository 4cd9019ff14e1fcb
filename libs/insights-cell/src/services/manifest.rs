// libs/insights-cell/src/services/manifest.rs
use std::time::{Duration, Instant};

use reqwest::{
    header::{HeaderValue, ACCEPT},
    Client,
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use shared_config::AppConfig;

use crate::models::{InsightArticle, Manifest, PostMeta};

/// Cached manifests older than this are treated as absent, forcing a refetch.
const MANIFEST_TTL: Duration = Duration::from_secs(5 * 60);

/// Per-endpoint fetch bound; the content origin must never stall a page.
const FETCH_TIMEOUT: Duration = Duration::from_secs(2);

struct CachedManifest {
    manifest: Manifest,
    fetched_at: Instant,
}

/// Fetches and caches the blog's content manifest. One instance is shared
/// across requests; the read-check-refresh sequence tolerates two requests
/// racing past an expired entry (worst case one redundant fetch).
pub struct ManifestService {
    client: Client,
    origin: String,
    cache: RwLock<Option<CachedManifest>>,
}

impl ManifestService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_origin(config.blog_manifest_origin.clone())
    }

    pub fn with_origin(origin: String) -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
            cache: RwLock::new(None),
        }
    }

    /// Current manifest, served from cache while fresh. `None` when the
    /// origin is unconfigured or unreachable.
    pub async fn manifest(&self) -> Option<Manifest> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < MANIFEST_TTL {
                    return Some(cached.manifest.clone());
                }
            }
        }

        let manifest = self.fetch().await?;

        let mut cache = self.cache.write().await;
        *cache = Some(CachedManifest {
            manifest: manifest.clone(),
            fetched_at: Instant::now(),
        });

        Some(manifest)
    }

    async fn fetch(&self) -> Option<Manifest> {
        if self.origin.is_empty() {
            debug!("Blog manifest origin not configured, skipping fetch");
            return None;
        }

        let endpoints = [
            format!("{}/manifest.json", self.origin),
            format!("{}/api/manifest", self.origin),
        ];

        for endpoint in &endpoints {
            let response = self
                .client
                .get(endpoint)
                .header(ACCEPT, HeaderValue::from_static("application/json"))
                .send()
                .await;

            match response {
                Ok(response) if response.status().is_success() => {
                    match response.json::<Manifest>().await {
                        Ok(manifest) => {
                            debug!("Loaded blog manifest from {}", endpoint);
                            return Some(manifest);
                        }
                        Err(e) => warn!("Invalid manifest payload from {}: {}", endpoint, e),
                    }
                }
                Ok(response) => {
                    warn!("Manifest endpoint {} returned {}", endpoint, response.status())
                }
                Err(e) => warn!("Failed manifest endpoint {}: {}", endpoint, e),
            }
        }

        None
    }

    fn map_post(&self, post: &PostMeta) -> InsightArticle {
        let is_linkedin = post.source.as_deref() == Some("linkedin");
        let link = match (&post.linkedin_url, is_linkedin) {
            (Some(url), true) => url.clone(),
            _ => format!("{}/{}", self.origin, post.slug),
        };

        InsightArticle {
            id: post.slug.clone(),
            title: post.title.clone(),
            subtitle: post.category.clone().unwrap_or_default(),
            platform: if is_linkedin { "LinkedIn" } else { "Blog" }.to_string(),
            excerpt: post.excerpt.clone().unwrap_or_default(),
            image_url: post.feature_image.clone().unwrap_or_default(),
            link,
            date: post.published_at.format("%Y-%m-%d").to_string(),
            category: post.category.clone().unwrap_or_else(|| "Essay".to_string()),
            tags: post.tags.clone(),
        }
    }

    /// Newest posts first. Empty when the manifest cannot be loaded.
    pub async fn latest(&self, limit: usize) -> Vec<InsightArticle> {
        let Some(manifest) = self.manifest().await else {
            return Vec::new();
        };

        let mut posts = manifest.posts;
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        posts
            .iter()
            .take(limit)
            .map(|post| self.map_post(post))
            .collect()
    }

    /// Featured posts, newest first.
    pub async fn featured(&self, limit: usize) -> Vec<InsightArticle> {
        let Some(manifest) = self.manifest().await else {
            return Vec::new();
        };

        let mut posts: Vec<PostMeta> = manifest.posts.into_iter().filter(|p| p.featured).collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        posts
            .iter()
            .take(limit)
            .map(|post| self.map_post(post))
            .collect()
    }
}

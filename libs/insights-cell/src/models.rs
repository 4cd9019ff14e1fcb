// libs/insights-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One post entry in the externally hosted content manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    pub slug: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub feature_image: Option<String>,
    /// "linkedin" or "mdx"; anything else is treated as a regular blog post.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub posts: Vec<PostMeta>,
}

/// A manifest post mapped into the shape the portfolio's insights section
/// renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightArticle {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub platform: String,
    pub excerpt: String,
    pub image_url: String,
    pub link: String,
    /// YYYY-MM-DD.
    pub date: String,
    pub category: String,
    pub tags: Vec<String>,
}

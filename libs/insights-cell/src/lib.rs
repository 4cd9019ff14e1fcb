pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

// Re-export commonly used types
pub use models::{InsightArticle, Manifest, PostMeta};
pub use router::insights_routes;
pub use services::manifest::ManifestService;

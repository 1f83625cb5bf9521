//! Blog Post Model

use serde::{Deserialize, Serialize};

/// Create blog post payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostCreate {
    pub title: String,
    pub category: String,
    pub description: String,
    pub content: String,
    pub images: Vec<String>,
    /// ISO 8601 timestamp
    pub created_at: String,
}

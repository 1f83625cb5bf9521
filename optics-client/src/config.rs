//! Client configuration

use crate::error::{ClientError, ClientResult};

/// Default storage bucket for blog images
pub const DEFAULT_BLOG_IMAGE_BUCKET: &str = "blog-images";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the hosted backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | SUPABASE_URL | (required) | project base URL |
/// | SUPABASE_ANON_KEY | (required) | public API key |
/// | REQUEST_TIMEOUT_SECS | 30 | request timeout |
/// | BLOG_IMAGE_BUCKET | blog-images | storage bucket for blog images |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Project base URL (e.g., "https://abc.supabase.co")
    pub base_url: String,

    /// Public API key, sent as `apikey` on every request
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Bucket that receives blog images
    pub blog_image_bucket: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            blog_image_bucket: DEFAULT_BLOG_IMAGE_BUCKET.to_string(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ClientError::Config(format!("{} must be set", key)))
        };

        let mut config = Self::new(required("SUPABASE_URL")?, required("SUPABASE_ANON_KEY")?);

        if let Some(timeout) = lookup("REQUEST_TIMEOUT_SECS") {
            config.timeout = timeout.trim().parse().map_err(|_| {
                ClientError::Config(format!("REQUEST_TIMEOUT_SECS is not a number: {}", timeout))
            })?;
        }
        if let Some(bucket) = lookup("BLOG_IMAGE_BUCKET").filter(|b| !b.trim().is_empty()) {
            config.blog_image_bucket = bucket;
        }

        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the blog image bucket
    pub fn with_blog_image_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.blog_image_bucket = bucket.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<super::HttpClient> {
        super::HttpClient::new(self)
    }
}

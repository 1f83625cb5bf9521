//! Object storage client

use crate::{ClientResult, HttpClient};
use reqwest::Method;

const STORAGE_PREFIX: &str = "storage/v1/object";

#[derive(Debug, serde::Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: Option<String>,
}

/// Uploads files to a bucket and resolves their public URLs
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: HttpClient,
}

impl StorageClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Upload `bytes` as `object_name` and return the object path inside
    /// the bucket. The content type is guessed from the name.
    pub async fn upload(
        &self,
        bucket: &str,
        object_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<String> {
        let content_type = mime_guess::from_path(object_name).first_or_octet_stream();
        tracing::debug!(bucket = %bucket, object = %object_name, size = bytes.len(), "upload");

        let request = self
            .http
            .request(Method::POST, &format!("{}/{}/{}", STORAGE_PREFIX, bucket, object_name))
            .header(reqwest::header::CONTENT_TYPE, content_type.essence_str())
            .body(bytes);
        let resp: UploadResponse = self.http.send(request).await?;

        // `Key` is "bucket/path"; fall back to the requested name
        let path = resp
            .key
            .as_deref()
            .and_then(|key| key.strip_prefix(&format!("{}/", bucket)).map(str::to_string))
            .unwrap_or_else(|| object_name.to_string());
        Ok(path)
    }

    /// Public URL of an object in a public bucket
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.http
            .url(&format!("{}/public/{}/{}", STORAGE_PREFIX, bucket, path))
    }
}

/// Object name for an uploaded file: `{prefix}_{millis}_{file_name}`, with
/// path separators and whitespace in the file name replaced.
pub fn object_name(prefix: &str, millis: i64, file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{}_{}_{}", prefix, millis, cleaned)
}

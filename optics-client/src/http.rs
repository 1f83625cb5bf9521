//! HTTP transport shared by the table, auth and storage clients

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Error body returned by the backend
///
/// The table API answers `{code, message, details, hint}`, the auth API
/// `{error, error_description}` or `{code, msg}`, storage
/// `{statusCode, error, message}`. All fields are optional so any of
/// them parses.
#[derive(Debug, Default, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
    #[serde(default)]
    hint: Option<String>,
}

impl ApiErrorBody {
    fn message(&self) -> Option<String> {
        self.message
            .as_ref()
            .or(self.msg.as_ref())
            .or(self.error_description.as_ref())
            .or(self.error.as_ref())
            .filter(|m| !m.trim().is_empty())
            .cloned()
    }

    fn code(&self) -> Option<String> {
        match self.code.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn details(&self) -> Option<String> {
        let details = match &self.details {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
        match (&details, &self.hint) {
            (Some(d), Some(h)) => Some(format!("{} ({})", d, h)),
            (Some(d), None) => Some(d.clone()),
            (None, Some(h)) => Some(h.clone()),
            (None, None) => None,
        }
    }
}

/// HTTP client for the hosted backend
///
/// Every request carries the `apikey` header. The bearer token is the
/// signed-in session's access token, or the API key itself before
/// sign-in.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    api_key: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            token: None,
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build authorization header value
    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token.as_deref().unwrap_or(&self.api_key))
    }

    /// Start a request with the common headers set
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("apikey", &self.api_key)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
    }

    /// Send and decode a JSON response
    pub async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ClientError::InvalidResponse("Empty response body".into()));
        }
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    /// Send and discard the response body
    pub async fn send_empty(&self, request: RequestBuilder) -> ClientResult<()> {
        let response = request.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Map non-success statuses onto `ClientError`
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        Err(Self::error_from_body(status, &text))
    }

    fn error_from_body(status: StatusCode, text: &str) -> ClientError {
        let body: ApiErrorBody = serde_json::from_str(text).unwrap_or_default();
        let message = body.message().unwrap_or_else(|| {
            if text.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            } else {
                text.to_string()
            }
        });

        tracing::debug!(status = %status, message = %message, "Backend request failed");

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            _ => match body.code() {
                Some(code) => ClientError::Api {
                    code,
                    message,
                    details: body.details(),
                },
                None if status == StatusCode::BAD_REQUEST
                    || status == StatusCode::UNPROCESSABLE_ENTITY =>
                {
                    ClientError::Validation(message)
                }
                None => ClientError::Internal(message),
            },
        }
    }
}

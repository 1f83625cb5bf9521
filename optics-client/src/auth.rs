//! Auth gate
//!
//! Password sign-in against the hosted auth API. Every screen requires a
//! live session; `AuthGate::require` is the single check they go through.

use crate::{ClientError, ClientResult, HttpClient};
use reqwest::Method;
use serde::{Deserialize, Serialize};

const TOKEN_PATH: &str = "auth/v1/token";
const LOGOUT_PATH: &str = "auth/v1/logout";

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

/// Session issued by the auth API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds)
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    fn from_response(resp: TokenResponse, now: i64) -> Self {
        let expires_at = resp
            .expires_at
            .or_else(|| resp.expires_in.map(|secs| now + secs))
            .or_else(|| Self::parse_jwt_exp(&resp.access_token));
        Self {
            access_token: resp.access_token,
            refresh_token: resp.refresh_token,
            expires_at,
            user: resp.user,
        }
    }

    /// Read the `exp` claim from a JWT without verifying it
    pub fn parse_jwt_exp(token: &str) -> Option<i64> {
        // header.payload.signature
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return None;
        }

        use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
        let payload_bytes = URL_SAFE_NO_PAD.decode(parts[1].trim_end_matches('=')).ok()?;
        let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
        payload.get("exp")?.as_i64()
    }

    /// Sessions without a known expiry are treated as live.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// Session holder gating access to every screen
#[derive(Debug, Clone)]
pub struct AuthGate {
    http: HttpClient,
    session: Option<Session>,
}

impl AuthGate {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            session: None,
        }
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    /// Sign in with email and password
    pub async fn sign_in(&mut self, email: &str, password: &str) -> ClientResult<&Session> {
        let request = self
            .http
            .request(Method::POST, TOKEN_PATH)
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password });
        let resp: TokenResponse = self.http.send(request).await.map_err(|e| match e {
            // The auth API answers bad credentials with 400
            ClientError::Validation(msg) => ClientError::Unauthorized(msg),
            other => other,
        })?;

        let session = Session::from_response(resp, Self::now());
        tracing::info!(user_id = %session.user.id, "Signed in");
        Ok(&*self.session.insert(session))
    }

    /// Exchange the refresh token for a new session
    pub async fn refresh(&mut self) -> ClientResult<&Session> {
        let refresh_token = self
            .session
            .as_ref()
            .and_then(|s| s.refresh_token.clone())
            .ok_or_else(|| ClientError::Unauthorized("No refresh token".into()))?;

        let request = self
            .http
            .request(Method::POST, TOKEN_PATH)
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshGrant {
                refresh_token: &refresh_token,
            });
        let resp: TokenResponse = self.http.send(request).await?;

        let session = Session::from_response(resp, Self::now());
        tracing::debug!(user_id = %session.user.id, "Session refreshed");
        Ok(&*self.session.insert(session))
    }

    /// Sign out. The local session is dropped even when the remote call fails.
    pub async fn sign_out(&mut self) -> ClientResult<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };

        let request = self
            .http
            .clone()
            .with_token(session.access_token)
            .request(Method::POST, LOGOUT_PATH);
        let result = self.http.send_empty(request).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Remote sign-out failed");
        } else {
            tracing::info!(user_id = %session.user.id, "Signed out");
        }
        result
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether a non-expired session is held
    pub fn is_authenticated(&self) -> bool {
        self.require().is_ok()
    }

    /// The live session, or `Unauthorized`
    pub fn require(&self) -> ClientResult<&Session> {
        match &self.session {
            Some(session) if !session.is_expired(Self::now()) => Ok(session),
            Some(_) => Err(ClientError::Unauthorized("Session expired".into())),
            None => Err(ClientError::Unauthorized("Please sign in first".into())),
        }
    }

    /// HTTP client carrying the session's access token
    pub fn authorized_http(&self) -> ClientResult<HttpClient> {
        let session = self.require()?;
        Ok(self.http.clone().with_token(session.access_token.clone()))
    }
}

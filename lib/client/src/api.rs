//! REST client for the groupdesk backend.
//!
//! Every authorized call carries `Authorization: Bearer <token>` taken from
//! the injected [`SessionContext`]. The client is also the caller that
//! reacts to a rejected token: a `401` clears the session, which moves the
//! session gate back to `Unauthenticated`.

use groupdesk_core::Result;
use groupdesk_session::{Role, SessionContext, SessionToken};
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Credentials posted to the login endpoint.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Body returned by the login endpoint.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Error body the backend sends with failed requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// A new account request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// HTTP client bound to one backend and one session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &ClientConfig, session: SessionContext) -> Result<Self, ClientError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout());

        let http = builder.build().map_err(|e| ClientError::Configuration {
            details: e.to_string(),
        })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Returns the session this client authorizes with.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Logs in and persists the issued token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::LoginRejected`] if the backend refuses the
    /// credentials, or a request/decode error.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionToken, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(request_failed)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = error_message(response).await;
            tracing::info!(status, "Login rejected");
            return Err(ClientError::LoginRejected { status, message }.into());
        }

        let body: LoginResponse = response.json().await.map_err(decode_failed)?;
        let token = SessionToken::new(body.token);
        self.session.set_token(&token);

        tracing::info!("Logged in");
        Ok(token)
    }

    /// Creates an account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] if the backend refuses the
    /// registration, or a request error.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &Registration) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(registration)
            .send()
            .await
            .map_err(request_failed)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = error_message(response).await;
            return Err(ClientError::Status { status, message }.into());
        }

        tracing::info!("Registered account");
        Ok(())
    }

    /// Logs out by clearing all persisted session state.
    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("Logged out");
    }

    /// Fetches `path` and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// See [`ClientError`]; a `401` also clears the session.
    #[instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.send(self.http.get(self.url(path))).await?;
        response.json().await.map_err(|e| decode_failed(e).into())
    }

    /// Posts `body` as JSON to `path` and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ClientError`]; a `401` also clears the session.
    #[instrument(skip(self, body))]
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        response.json().await.map_err(|e| decode_failed(e).into())
    }

    /// Puts `body` as JSON to `path` and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ClientError`]; a `401` also clears the session.
    #[instrument(skip(self, body))]
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.http.put(self.url(path)).json(body)).await?;
        response.json().await.map_err(|e| decode_failed(e).into())
    }

    /// Deletes the resource at `path`.
    ///
    /// # Errors
    ///
    /// See [`ClientError`]; a `401` also clears the session.
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let token = self.session.token().ok_or(ClientError::NotAuthenticated)?;

        let response = request
            .header(AUTHORIZATION, token.bearer())
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let message = error_message(response).await;
            tracing::warn!(%message, "Session token rejected, clearing session");
            self.session.clear();
            return Err(ClientError::Unauthorized { message }.into());
        }

        if !status.is_success() {
            let message = error_message(response).await;
            tracing::debug!(status = status.as_u16(), %message, "Request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        Ok(response)
    }
}

fn request_failed(e: reqwest::Error) -> ClientError {
    ClientError::Request {
        details: e.to_string(),
    }
}

fn decode_failed(e: reqwest::Error) -> ClientError {
    ClientError::Decode {
        details: e.to_string(),
    }
}

/// Extracts a human-readable message from a failed response.
///
/// Prefers the backend's `{"message": ...}` body, then the raw text, then
/// the status reason.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
        return body.message;
    }
    if !text.trim().is_empty() {
        return text;
    }
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

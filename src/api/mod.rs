//! REST client module.
//!
//! Thin typed wrappers over the inventory backend. The backend owns every
//! business rule; this module only attaches credentials, decodes replies and
//! forces a logout when the token is rejected.

pub mod endpoints;
mod batches;
mod notifications;
mod products;
mod users;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::{AppError, BackendErrorBody};
use crate::models::Session;
use crate::session::SessionStore;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Whether a request runs with the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    /// No token; a 401 means bad credentials
    Public,
    /// Bearer token; a 401 means the session is gone
    Authenticated,
}

/// HTTP client for the inventory backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    store: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config, store: SessionStore) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            token: None,
            store,
        })
    }

    /// Attach the session's bearer token to every authenticated call.
    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = Some(session.access_token.clone());
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    fn patch(&self, path: &str) -> RequestBuilder {
        self.http.patch(self.url(path))
    }

    /// Send a request and turn non-success replies into errors.
    async fn execute(&self, builder: RequestBuilder, access: Access) -> Result<Response, AppError> {
        let response = self.send(builder, access).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::backend_error(response).await);
        }

        Ok(response)
    }

    /// Send a request, handling credentials and 401 replies only.
    ///
    /// Any other status is left for the caller to classify.
    async fn send(&self, builder: RequestBuilder, access: Access) -> Result<Response, AppError> {
        let request_id = Uuid::new_v4();
        let mut builder = builder.header(REQUEST_ID_HEADER, request_id.to_string());

        if access == Access::Authenticated {
            match &self.token {
                Some(token) => builder = builder.bearer_auth(token),
                None => {
                    return Err(AppError::Unauthorized(
                        "No user is logged in".to_string(),
                    ))
                }
            }
        }

        let request = builder.build()?;
        tracing::debug!(
            request_id = %request_id,
            "{} {}",
            request.method(),
            request.url().path()
        );

        let response = self.http.execute(request).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(self.unauthorized(response, access).await);
        }

        if !status.is_success() {
            tracing::warn!(request_id = %request_id, "Backend replied HTTP {}", status.as_u16());
        }

        Ok(response)
    }

    async fn backend_error(response: Response) -> AppError {
        let status = response.status();
        let body = response.json::<BackendErrorBody>().await.ok();
        AppError::from_backend(status, body)
    }

    async fn unauthorized(&self, response: Response, access: Access) -> AppError {
        match access {
            Access::Public => {
                let body = response.json::<BackendErrorBody>().await.ok();
                let message = body
                    .and_then(|b| b.detail)
                    .and_then(|d| d.as_str().map(str::to_string))
                    .unwrap_or_else(|| "Invalid username or password".to_string());
                AppError::Unauthorized(message)
            }
            Access::Authenticated => {
                tracing::warn!("Token expired or not authorized, clearing session");
                if let Err(e) = self.store.clear().await {
                    tracing::error!("Failed to clear session: {}", e);
                }
                AppError::Unauthorized("Session expired, please log in again".to_string())
            }
        }
    }

    /// Authenticated request with a JSON reply.
    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AppError> {
        let response = self.execute(builder, Access::Authenticated).await?;
        Ok(response.json::<T>().await?)
    }

    /// Authenticated request whose reply body is ignored.
    async fn submit(&self, builder: RequestBuilder) -> Result<(), AppError> {
        self.execute(builder, Access::Authenticated).await?;
        Ok(())
    }
}

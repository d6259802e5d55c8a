//! # API Client
//!
//! The one object every resource service talks through. It owns the transport
//! and the token store and applies three steps to each call:
//!
//! ```text
//! service method
//!     │
//!     ▼
//! attach bearer ──► transport ──► 401? ──► refresh once ──► re-send once
//!                                    │                          │
//!                                    ▼                          ▼
//!                              non-2xx → ApiError::Http (401 after retry → Unauthorized)
//!                                    │
//!                                    ▼
//!                      envelope unwrap → T | ApiError::Api
//! ```
//!
//! Refreshes are de-duplicated: requests that fail with the same stale token
//! while a refresh is in flight wait for it and reuse its result instead of
//! issuing their own.

use std::sync::Arc;
use std::time::Instant;

use reqwest::StatusCode;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use shared::{ApiEnvelope, PaginatedResponse, PaginationParams, RefreshRequest, RefreshResponse};
use tokio::sync::Mutex;

use super::transport::{FileUpload, HttpRequest, HttpResponse, ReqwestTransport};
use crate::config::ClientConfig;
use crate::core::{ApiError, Result, Transport};
use crate::storage::TokenStore;

pub const REFRESH_PATH: &str = "/auth/refresh";

/// Authenticated JSON client shared by all resource services.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<TokenStore>,
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<TokenStore>) -> Self {
        Self {
            transport,
            tokens,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Client over the reqwest transport described by `config`.
    pub fn from_config(config: &ClientConfig, tokens: Arc<TokenStore>) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), tokens))
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    // region:    --- Verbs

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(HttpRequest::get(path)).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T> {
        self.request(HttpRequest::get(path).query(query)).await
    }

    /// `GET` a paginated collection.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<T>> {
        self.get_page_with_query(path, params, Vec::new()).await
    }

    /// `GET` a paginated collection with extra filter parameters.
    pub async fn get_page_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&PaginationParams>,
        mut query: Vec<(String, String)>,
    ) -> Result<PaginatedResponse<T>> {
        if let Some(params) = params {
            query.extend(params.to_query());
        }
        self.request(HttpRequest::get(path).query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(HttpRequest::post(path).json(body)?).await
    }

    /// `POST` without a body, ignoring any returned data.
    pub async fn post_unit(&self, path: &str) -> Result<()> {
        self.request_unit(HttpRequest::post(path)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(HttpRequest::put(path).json(body)?).await
    }

    /// `PUT` without a body, ignoring any returned data.
    pub async fn put_unit(&self, path: &str) -> Result<()> {
        self.request_unit(HttpRequest::put(path)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(HttpRequest::patch(path).json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(HttpRequest::delete(path)).await
    }

    /// `DELETE`, ignoring any returned data.
    pub async fn delete_unit(&self, path: &str) -> Result<()> {
        self.request_unit(HttpRequest::delete(path)).await
    }

    /// Upload one file as multipart field `field`; returns the hosted URL.
    pub async fn upload_file(&self, path: &str, field: &str, file: FileUpload) -> Result<String> {
        let uploaded: shared::UploadedFile = self
            .request(HttpRequest::post(path).multipart(vec![(field.to_string(), file)]))
            .await?;
        Ok(uploaded.url)
    }

    /// Upload several files under the same multipart field; returns the hosted URLs
    /// in submission order.
    pub async fn upload_files(&self, path: &str, field: &str, files: Vec<FileUpload>) -> Result<Vec<String>> {
        if files.is_empty() {
            return Err(ApiError::Validation("No files to upload".to_string()));
        }
        let parts = files.into_iter().map(|file| (field.to_string(), file)).collect();
        let uploaded: shared::UploadedFiles = self.request(HttpRequest::post(path).multipart(parts)).await?;
        Ok(uploaded.urls)
    }

    /// `POST` that bypasses the auth interceptor: no bearer header, no refresh on 401.
    ///
    /// Used for login, registration and refresh, where a 401 means bad credentials.
    pub async fn post_public<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = HttpRequest::post(path).json(body)?;
        let response = self.transport.send(request).await?;
        unwrap_envelope(&ensure_success(response)?)
    }

    // endregion: --- Verbs

    /// Send through the auth interceptor and unwrap the envelope into `T`.
    pub async fn request<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let response = self.send(request).await?;
        unwrap_envelope(&response)
    }

    /// Send through the auth interceptor and require `success: true`.
    ///
    /// `data` may be absent; an empty 2xx body (204) also counts as success.
    pub async fn request_unit(&self, request: HttpRequest) -> Result<()> {
        let response = self.send(request).await?;
        unwrap_unit(&response)
    }

    /// Send with bearer auth, recovering once from an expired access token.
    ///
    /// Returns the 2xx response, or the error for any other outcome.
    #[tracing::instrument(
        name = "api_request",
        skip(self, request),
        fields(
            method = %request.method,
            path = %request.path,
            request_id = %uuid::Uuid::new_v4(),
            status = tracing::field::Empty,
            retried = false,
        )
    )]
    pub async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse> {
        let start = Instant::now();
        let token = self.tokens.get_auth_token().await?;
        if let Some(token) = &token {
            request.set_bearer(token)?;
        }

        let response = self.transport.send(request.clone()).await?;
        if response.status != StatusCode::UNAUTHORIZED {
            let span = tracing::Span::current();
            span.record("status", response.status.as_u16());
            tracing::debug!(duration_ms = start.elapsed().as_millis(), "Request completed");
            return ensure_success(response);
        }

        tracing::info!("Access token rejected, attempting refresh");
        let rejection = error_message(&response);
        let fresh = self.refresh_after_rejection(token.as_deref(), rejection).await?;
        request.set_bearer(&fresh)?;

        let span = tracing::Span::current();
        span.record("retried", true);
        let retried = self.transport.send(request).await?;
        span.record("status", retried.status.as_u16());

        if retried.status == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                duration_ms = start.elapsed().as_millis(),
                "Request rejected again after refresh"
            );
            return Err(ApiError::Unauthorized(error_message(&retried)));
        }
        tracing::debug!(duration_ms = start.elapsed().as_millis(), "Request completed after refresh");
        ensure_success(retried)
    }

    /// Exchange the stored refresh token for a new access token right away.
    pub async fn refresh_session(&self) -> Result<String> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked("Not logged in".to_string()).await
    }

    async fn refresh_after_rejection(&self, rejected: Option<&str>, rejection: String) -> Result<String> {
        let _guard = self.refresh_lock.lock().await;

        // Another request may have refreshed while this one waited for the lock.
        let current = self.tokens.get_auth_token().await?;
        if let Some(current) = current.filter(|c| Some(c.as_str()) != rejected) {
            tracing::debug!("Reusing token refreshed by a concurrent request");
            return Ok(current);
        }

        self.refresh_locked(rejection).await
    }

    async fn refresh_locked(&self, rejection: String) -> Result<String> {
        let generation = self.tokens.generation();
        let Some(refresh_token) = self.tokens.get_refresh_token().await? else {
            tracing::warn!("No refresh token available, ending session");
            self.clear_auth_after_failure().await;
            return Err(ApiError::Unauthorized(rejection));
        };

        let body = RefreshRequest { refresh_token };
        match self.post_public::<_, RefreshResponse>(REFRESH_PATH, &body).await {
            Ok(refreshed) => {
                if !self.tokens.apply_refresh(&refreshed, generation).await? {
                    tracing::info!("Session ended while refreshing, discarding new tokens");
                    return Err(ApiError::Unauthorized("Logged out".to_string()));
                }
                tracing::info!("Access token refreshed");
                Ok(refreshed.token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, ending session");
                self.clear_auth_after_failure().await;
                Err(ApiError::SessionExpired(Box::new(e)))
            }
        }
    }

    async fn clear_auth_after_failure(&self) {
        if let Err(e) = self.tokens.clear_auth().await {
            tracing::error!(error = %e, "Failed to clear persisted auth state");
        }
    }
}

/// Map a non-2xx response to `ApiError::Http`; pass 2xx through.
fn ensure_success(response: HttpResponse) -> Result<HttpResponse> {
    if response.status.is_success() {
        return Ok(response);
    }
    let message = error_message(&response);
    tracing::warn!(status = response.status.as_u16(), error = %message, "Request failed");
    Err(ApiError::Http {
        status: response.status.as_u16(),
        message,
    })
}

/// Best message for a failed response: envelope `error`/`message`, else the
/// status reason phrase.
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_slice::<ApiEnvelope<IgnoredAny>>(&response.body)
        .ok()
        .filter(|envelope| envelope.error.is_some() || envelope.message.is_some())
        .map(|envelope| envelope.failure_message())
        .unwrap_or_else(|| {
            response
                .status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}

/// Parse the envelope and return its payload as `T`.
fn unwrap_envelope<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_slice(&response.body)
        .map_err(|e| ApiError::Decode(format!("Malformed response envelope: {}", e)))?;
    let data = envelope.into_data().map_err(ApiError::Api)?;
    serde_json::from_value(data).map_err(|e| ApiError::Decode(format!("Unexpected response payload: {}", e)))
}

/// Parse the envelope and require `success: true`, ignoring `data`.
fn unwrap_unit(response: &HttpResponse) -> Result<()> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    let envelope: ApiEnvelope<IgnoredAny> = serde_json::from_slice(&response.body)
        .map_err(|e| ApiError::Decode(format!("Malformed response envelope: {}", e)))?;
    if envelope.success {
        Ok(())
    } else {
        Err(ApiError::Api(envelope.failure_message()))
    }
}

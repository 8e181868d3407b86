//! Resilient API client: the single choke point for every network call.
//!
//! Responsibilities:
//! - join relative resource paths onto the configured base URL
//! - attach `Authorization: Bearer <token>` when a live access token is held
//! - set `Content-Type: application/json` for JSON bodies and *no* content
//!   type for multipart bodies (the transport supplies the boundary)
//! - honor `Retry-After` on HTTP 429 without growing the exponential backoff
//! - retry transient failures (transport errors, 5xx) with exponential
//!   backoff, `retry_delay * 2^attempt`, up to `retries` times

use crate::auth::TokenStore;
use crate::error::{decode_error, ApiError};
use crate::transport::{FilePart, HttpRequest, Method, ReqwestTransport, RequestBody, Transport};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Retries after the initial attempt, so `retries + 1` attempts total.
    pub retries: u32,
    /// Base backoff delay, doubled on every consumed retry slot.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    tokens: TokenStore,
    retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(config: &crate::config::Config, tokens: TokenStore) -> Self {
        let transport = ReqwestTransport::new(Duration::from_millis(config.request_timeout_ms));
        Self::with_transport(
            config.api_base_url.clone(),
            tokens,
            config.retry_policy(),
            Arc::new(transport),
        )
    }

    /// Build a client over an arbitrary transport. Tests use this to install
    /// a scripted transport; hosts can use it to layer their own middleware.
    pub fn with_transport(
        base_url: impl Into<String>,
        tokens: TokenStore,
        retry: RetryPolicy,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            transport,
            base_url,
            tokens,
            retry,
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::Get, path, RequestBody::Empty).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        self.request(Method::Post, path, json_body(body)?).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        self.request(Method::Put, path, json_body(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::Delete, path, RequestBody::Empty).await
    }

    /// Multipart file upload (bulk word-list import).
    pub async fn upload(&self, path: &str, part: FilePart) -> Result<Value, ApiError> {
        self.request(Method::Post, path, RequestBody::Multipart(vec![part]))
            .await
    }

    fn build_request(&self, method: Method, path: &str, body: &RequestBody) -> HttpRequest {
        let url = format!("{}{}", self.base_url, path);
        let mut headers = Vec::new();
        if let Some(token) = self.tokens.access_token() {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        // Multipart gets no content type so the transport can assign the
        // boundary; empty bodies need none either.
        if matches!(body, RequestBody::Json(_)) {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url,
            headers,
            body: body.clone(),
        }
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Value, ApiError> {
        // `attempt` counts consumed backoff slots; rate-limit waits are
        // tracked separately so a 429 never grows the exponential delay.
        let mut attempt = 0u32;
        let mut limited = 0u32;
        loop {
            let request = self.build_request(method, path, &body);
            match self.transport.execute(request).await {
                Ok(response) if response.is_success() => {
                    return response.json().map_err(|_| ApiError::Unknown {
                        raw: response.text(),
                    });
                }
                Ok(response) if response.status == 429 => {
                    if limited >= self.retry.retries {
                        log::warn!("[client] {method} {path} still rate limited, giving up");
                        return Err(ApiError::RateLimited);
                    }
                    let wait = response
                        .header("retry-after")
                        .and_then(|v| v.trim().parse::<u64>().ok())
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    limited += 1;
                    log::warn!("[client] 429 {method} {path} waiting {wait}s (retry-after)");
                    sleep(Duration::from_secs(wait)).await;
                }
                Ok(response) if response.status >= 500 => {
                    if attempt >= self.retry.retries {
                        return Err(decode_error(response.status, &response.body));
                    }
                    let delay = self.backoff_delay(attempt);
                    attempt += 1;
                    log::warn!(
                        "[client] http {} {method} {path} retry={attempt} backoff={}ms",
                        response.status,
                        delay.as_millis()
                    );
                    sleep(delay).await;
                }
                // Remaining 4xx: decode once, never retry.
                Ok(response) => return Err(decode_error(response.status, &response.body)),
                Err(err) => {
                    if attempt >= self.retry.retries {
                        return Err(ApiError::Transport(err.0));
                    }
                    let delay = self.backoff_delay(attempt);
                    attempt += 1;
                    log::warn!(
                        "[client] err {method} {path} retry={attempt} backoff={}ms : {}",
                        delay.as_millis(),
                        err.0
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        // 500, 1000, 2000, ... for the default policy; saturates instead of
        // overflowing for absurdly large retry counts.
        self.retry
            .retry_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, ApiError> {
    let value = serde_json::to_value(body).map_err(|e| ApiError::Unknown {
        raw: format!("unserializable request body: {e}"),
    })?;
    Ok(RequestBody::Json(value))
}

//! Tokens, session gating and the auth flows.
//!
//! The platform issues a bearer access token (1 day) and a refresh token
//! (7 days). [`TokenStore`] mirrors those lifetimes client-side and treats an
//! expired token as absent. The store is cheaply cloneable shared state handed
//! to whoever needs it; there is no process-wide singleton.

use crate::client::ApiClient;
use crate::debounce::Debouncer;
use crate::error::ApiError;
use crate::models::{Credentials, ProfileUpdate, RegisterRequest, TokenPair, User};
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

const ACCESS_TOKEN_TTL_HOURS: i64 = 24;
const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone, Debug)]
struct StoredToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl StoredToken {
    fn live_value(&self) -> Option<String> {
        if Utc::now() < self.expires_at {
            Some(self.value.clone())
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
struct Tokens {
    access: Option<StoredToken>,
    refresh: Option<StoredToken>,
}

/// Shared holder for the session's token pair.
#[derive(Clone, Debug, Default)]
pub struct TokenStore {
    inner: Arc<Mutex<Tokens>>,
}

impl TokenStore {
    pub fn store_pair(&self, pair: &TokenPair) {
        let now = Utc::now();
        let mut inner = self.inner.lock().expect("token store poisoned");
        inner.access = Some(StoredToken {
            value: pair.access_token.clone(),
            expires_at: now + Duration::hours(ACCESS_TOKEN_TTL_HOURS),
        });
        inner.refresh = Some(StoredToken {
            value: pair.refresh_token.clone(),
            expires_at: now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
        });
        log::debug!("[auth] token pair stored");
    }

    /// The access token, if present and not expired.
    pub fn access_token(&self) -> Option<String> {
        let inner = self.inner.lock().expect("token store poisoned");
        inner.access.as_ref().and_then(StoredToken::live_value)
    }

    pub fn refresh_token(&self) -> Option<String> {
        let inner = self.inner.lock().expect("token store poisoned");
        inner.refresh.as_ref().and_then(StoredToken::live_value)
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("token store poisoned");
        *inner = Tokens::default();
        log::debug!("[auth] tokens cleared");
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    #[cfg(test)]
    fn store_access_with_ttl(&self, value: &str, ttl: Duration) {
        let mut inner = self.inner.lock().expect("token store poisoned");
        inner.access = Some(StoredToken {
            value: value.to_string(),
            expires_at: Utc::now() + ttl,
        });
    }
}

/// How a route relates to authentication.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteKind {
    /// Reachable by anyone (feed, single post).
    Public,
    /// Only sensible while logged out (login, registration).
    PublicOnly,
    /// Requires a live session (posting, profile, admin console).
    Protected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Allow,
    RedirectToLogin,
    RedirectToHome,
}

/// Route gate: decide what to do with a navigation attempt.
pub fn gate(route: RouteKind, tokens: &TokenStore) -> Gate {
    match (route, tokens.is_authenticated()) {
        (RouteKind::Protected, false) => Gate::RedirectToLogin,
        (RouteKind::PublicOnly, true) => Gate::RedirectToHome,
        _ => Gate::Allow,
    }
}

/// Auth flows: registration, login, refresh, password reset, profile.
#[derive(Clone)]
pub struct AuthStore {
    client: ApiClient,
    // One debouncer per field, so typing in one never cancels a check
    // in flight for the other.
    username_availability: Debouncer,
    email_availability: Debouncer,
}

impl AuthStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            username_availability: Debouncer::default(),
            email_availability: Debouncer::default(),
        }
    }

    /// Use the configured debounce delay instead of the default.
    pub fn with_debounce(client: ApiClient, delay: std::time::Duration) -> Self {
        Self {
            client,
            username_availability: Debouncer::new(delay),
            email_availability: Debouncer::new(delay),
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let value = self.client.post("/auth/register", request).await?;
        serde_json::from_value(value).map_err(unexpected_shape)
    }

    /// Log in and persist the returned token pair.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let value = self.client.post("/auth/login", credentials).await?;
        let pair: TokenPair = serde_json::from_value(value).map_err(unexpected_shape)?;
        self.client.tokens().store_pair(&pair);
        log::info!("[auth] logged in");
        Ok(pair)
    }

    /// Exchange the refresh token for a fresh pair.
    pub async fn refresh(&self) -> Result<TokenPair, ApiError> {
        let refresh_token =
            self.client
                .tokens()
                .refresh_token()
                .ok_or_else(|| ApiError::Status {
                    status: 401,
                    message: "no refresh token held".to_string(),
                })?;
        let value = self
            .client
            .post(
                "/auth/refresh",
                &serde_json::json!({ "refresh_token": refresh_token }),
            )
            .await?;
        let pair: TokenPair = serde_json::from_value(value).map_err(unexpected_shape)?;
        self.client.tokens().store_pair(&pair);
        Ok(pair)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self
            .client
            .post("/auth/logout", &serde_json::json!({}))
            .await;
        // Local session ends regardless of what the server thought of it.
        self.client.tokens().clear();
        log::info!("[auth] logged out");
        result.map(|_| ())
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.client
            .post(
                "/auth/forgot-password",
                &serde_json::json!({ "email": email }),
            )
            .await
            .map(|_| ())
    }

    pub async fn reset_password(&self, code: &str, new_password: &str) -> Result<(), ApiError> {
        self.client
            .post(
                "/auth/reset-password",
                &serde_json::json!({ "code": code, "password": new_password }),
            )
            .await
            .map(|_| ())
    }

    pub async fn check_username(&self, username: &str) -> Result<bool, ApiError> {
        let path = format!(
            "/auth/check-username?username={}",
            urlencoding::encode(username)
        );
        let value = self.client.get(&path).await?;
        Ok(availability(&value))
    }

    pub async fn check_email(&self, email: &str) -> Result<bool, ApiError> {
        let path = format!("/auth/check-email?email={}", urlencoding::encode(email));
        let value = self.client.get(&path).await?;
        Ok(availability(&value))
    }

    /// Debounced availability check for live form validation. Superseded
    /// keystrokes resolve to `None`, so a stale result can never land after
    /// a newer one.
    pub async fn check_username_debounced(&self, username: &str) -> Option<Result<bool, ApiError>> {
        let username = username.to_string();
        let store = self.clone();
        self.username_availability
            .run(move || async move { store.check_username(&username).await })
            .await
    }

    /// Debounced counterpart of [`check_email`](Self::check_email).
    pub async fn check_email_debounced(&self, email: &str) -> Option<Result<bool, ApiError>> {
        let email = email.to_string();
        let store = self.clone();
        self.email_availability
            .run(move || async move { store.check_email(&email).await })
            .await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        let value = self.client.get("/user/me").await?;
        serde_json::from_value(value).map_err(unexpected_shape)
    }

    /// Update the caller's profile. A successful update invalidates the
    /// session server-side, so the local tokens are dropped too and the host
    /// must send the user back through login.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let value = self.client.put("/user/me", update).await?;
        let user: User = serde_json::from_value(value).map_err(unexpected_shape)?;
        self.client.tokens().clear();
        log::info!("[auth] profile updated, session ended");
        Ok(user)
    }
}

fn availability(value: &serde_json::Value) -> bool {
    value
        .get("available")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false)
}

fn unexpected_shape(err: serde_json::Error) -> ApiError {
    ApiError::Unknown {
        raw: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_is_unauthenticated() {
        let tokens = TokenStore::default();
        assert!(!tokens.is_authenticated());
        assert_eq!(tokens.access_token(), None);
    }

    #[test]
    fn stored_pair_round_trips() {
        let tokens = TokenStore::default();
        tokens.store_pair(&TokenPair {
            access_token: "acc".into(),
            refresh_token: "ref".into(),
        });
        assert_eq!(tokens.access_token().as_deref(), Some("acc"));
        assert_eq!(tokens.refresh_token().as_deref(), Some("ref"));
        tokens.clear();
        assert!(!tokens.is_authenticated());
    }

    #[test]
    fn expired_access_token_is_treated_as_absent() {
        let tokens = TokenStore::default();
        tokens.store_access_with_ttl("stale", Duration::seconds(-1));
        assert_eq!(tokens.access_token(), None);
        assert!(!tokens.is_authenticated());
    }

    #[test]
    fn gate_redirects_by_route_kind() {
        let tokens = TokenStore::default();
        assert_eq!(gate(RouteKind::Public, &tokens), Gate::Allow);
        assert_eq!(gate(RouteKind::PublicOnly, &tokens), Gate::Allow);
        assert_eq!(gate(RouteKind::Protected, &tokens), Gate::RedirectToLogin);

        tokens.store_pair(&TokenPair {
            access_token: "acc".into(),
            refresh_token: "ref".into(),
        });
        assert_eq!(gate(RouteKind::Public, &tokens), Gate::Allow);
        assert_eq!(gate(RouteKind::PublicOnly, &tokens), Gate::RedirectToHome);
        assert_eq!(gate(RouteKind::Protected, &tokens), Gate::Allow);
    }
}

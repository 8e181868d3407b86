//! Unburden client SDK.
//!
//! Async client layer for the Unburden platform, a social service for
//! anonymously sharing personal trauma narratives, and the state stores its
//! companion admin console drives.
//!
//! ## Architecture
//!
//! - [`client::ApiClient`] is the single choke point for network calls:
//!   bearer-token injection, JSON/multipart body handling, `Retry-After`
//!   honoring on 429 and exponential backoff on transient failures.
//! - [`store`] holds one thin state container per resource over a shared
//!   generic CRUD pattern.
//! - [`wizard::StepGate`] guards the multi-page flows (registration,
//!   forgot-password, contact).
//!
//! Everything is injected: build a [`config::Config`], a
//! [`auth::TokenStore`] and an [`client::ApiClient`], then hand the client
//! to the stores you need. No process-wide singletons.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! let config = unburden::config::load()?;
//! let tokens = unburden::auth::TokenStore::default();
//! let client = unburden::client::ApiClient::new(&config, tokens);
//! let posts = unburden::store::posts::PostStore::new(client.clone());
//! let feed = posts.fetch_all().await?;
//! # Ok(()) }
//! ```

// Configuration (environment-driven, .env aware)
pub mod config;

// Error taxonomy, decoded once at the client boundary
pub mod error;

// Transport seam and the reqwest-backed production transport
pub mod transport;

// Resilient API client (auth injection, retry, rate-limit honoring)
pub mod client;

// Tokens, session gating, auth flows
pub mod auth;

// Wire models mirrored from the API
pub mod models;

// Resource stores
pub mod store;

// Step gates for multi-page flows
pub mod wizard;

// Cancellable debounce for availability checks
pub mod debounce;

// Re-export commonly used types
pub use auth::{AuthStore, TokenStore};
pub use client::{ApiClient, RetryPolicy};
pub use config::Config;
pub use error::ApiError;
pub use wizard::{Flow, StepGate};

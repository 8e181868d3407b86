//! Resource stores: thin state containers over the API client.
//!
//! Every resource follows the same shape (a cached collection, a selected
//! item, a loading flag and the last error), so the CRUD plumbing lives once
//! in [`Store<R>`] and each resource only declares its [`Resource`] binding
//! plus whatever extra operations it has.
//!
//! Actions record failures into state *and* return them, from the same
//! [`ApiError`], so the toast message a caller shows and the error the state
//! carries can never drift apart. Mutations resynchronize by refetching the
//! whole collection; there is no optimistic local patch.

use crate::client::ApiClient;
use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub mod dashboard;
pub mod likes;
pub mod notifications;
pub mod posts;
pub mod replies;
pub mod reports;
pub mod tags;
pub mod users;
pub mod words;

pub use dashboard::DashboardStore;
pub use likes::{LikeOutcome, LikeStore};
pub use notifications::Notifications;
pub use posts::Posts;
pub use replies::ReplyStore;
pub use reports::Reports;
pub use tags::Tags;
pub use users::Users;
pub use words::{BadWords, GoodWords};

/// Cached view of one resource, snapshot-cloneable for rendering.
#[derive(Clone, Debug)]
pub struct StoreState<T> {
    pub items: Vec<T>,
    pub selected: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            is_loading: false,
            error: None,
        }
    }
}

/// Binds a REST collection to its item and payload types.
pub trait Resource {
    const PATH: &'static str;
    type Item: DeserializeOwned + Clone + Send;
    type Create: Serialize + Sync + ?Sized;
    type Update: Serialize + Sync + ?Sized;
}

pub struct Store<R: Resource> {
    client: ApiClient,
    state: Arc<Mutex<StoreState<R::Item>>>,
}

impl<R: Resource> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<R: Resource> Store<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(StoreState::default())),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> StoreState<R::Item> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState<R::Item>> {
        self.state.lock().expect("store state poisoned")
    }

    fn begin(&self) {
        let mut state = self.lock();
        state.is_loading = true;
        state.error = None;
    }

    fn fail(&self, error: &ApiError) {
        let mut state = self.lock();
        state.is_loading = false;
        state.error = Some(error.to_string());
        log::warn!("[store] {} action failed: {error}", R::PATH);
    }

    pub async fn fetch_all(&self) -> Result<Vec<R::Item>, ApiError> {
        self.begin();
        let result = self
            .client
            .get(R::PATH)
            .await
            .and_then(decode_list::<R::Item>);
        match result {
            Ok(items) => {
                let mut state = self.lock();
                state.items = items.clone();
                state.is_loading = false;
                Ok(items)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    pub async fn fetch_by_id(&self, id: &str) -> Result<R::Item, ApiError> {
        self.begin();
        let path = format!("{}/{id}", R::PATH);
        let result = self.client.get(&path).await.and_then(decode_item::<R::Item>);
        match result {
            Ok(item) => {
                let mut state = self.lock();
                state.selected = Some(item.clone());
                state.is_loading = false;
                Ok(item)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Create, then refetch the collection. A resync failure after a
    /// successful create lands in state but does not fail the action.
    pub async fn create(&self, payload: &R::Create) -> Result<R::Item, ApiError> {
        self.begin();
        let result = self
            .client
            .post(R::PATH, payload)
            .await
            .and_then(decode_item::<R::Item>);
        match result {
            Ok(item) => {
                let _ = self.fetch_all().await;
                Ok(item)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    pub async fn update(&self, id: &str, payload: &R::Update) -> Result<R::Item, ApiError> {
        self.begin();
        let path = format!("{}/{id}", R::PATH);
        let result = self
            .client
            .put(&path, payload)
            .await
            .and_then(decode_item::<R::Item>);
        match result {
            Ok(item) => {
                let _ = self.fetch_all().await;
                Ok(item)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.begin();
        let path = format!("{}/{id}", R::PATH);
        match self.client.delete(&path).await {
            Ok(_) => {
                let _ = self.fetch_all().await;
                Ok(())
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }
}

/// Decode a collection response; accepts a bare array or `{"data": [...]}`.
pub(crate) fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map
            .remove("data")
            .or_else(|| map.remove("items"))
            .ok_or_else(|| ApiError::Unknown {
                raw: "collection response without a data field".to_string(),
            })?,
        Value::Null => Value::Array(Vec::new()),
        other => return Err(unexpected_shape(&other)),
    };
    serde_json::from_value(items).map_err(|e| ApiError::Unknown { raw: e.to_string() })
}

/// Decode a single-item response; accepts a bare object or `{"data": {...}}`.
pub(crate) fn decode_item<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let item = match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(item).map_err(|e| ApiError::Unknown { raw: e.to_string() })
}

fn unexpected_shape(value: &Value) -> ApiError {
    ApiError::Unknown {
        raw: value.to_string(),
    }
}

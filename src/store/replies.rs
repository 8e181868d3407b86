//! Reply store.
//!
//! Replies live under their parent post (`/posts/{post}/replies`), so the
//! path depends on the post and the generic [`Store`](crate::store::Store)
//! does not fit. The state shape and the refetch-on-mutation behavior are
//! the same.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{NewReply, Reply, ReplyPatch};
use crate::store::{decode_item, decode_list, StoreState};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct ReplyStore {
    client: ApiClient,
    state: Arc<Mutex<StoreState<Reply>>>,
}

impl ReplyStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(StoreState::default())),
        }
    }

    pub fn state(&self) -> StoreState<Reply> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState<Reply>> {
        self.state.lock().expect("reply state poisoned")
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
        log::warn!("[store] replies action failed: {error}");
    }

    fn path(post_id: &str) -> String {
        format!("/posts/{post_id}/replies")
    }

    pub async fn fetch_for_post(&self, post_id: &str) -> Result<Vec<Reply>, ApiError> {
        self.begin();
        let result = self
            .client
            .get(&Self::path(post_id))
            .await
            .and_then(decode_list::<Reply>);
        match result {
            Ok(replies) => {
                let mut state = self.lock();
                state.items = replies.clone();
                state.is_loading = false;
                Ok(replies)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    pub async fn create(&self, post_id: &str, payload: &NewReply) -> Result<Reply, ApiError> {
        self.begin();
        let result = self
            .client
            .post(&Self::path(post_id), payload)
            .await
            .and_then(decode_item::<Reply>);
        match result {
            Ok(reply) => {
                let _ = self.fetch_for_post(post_id).await;
                Ok(reply)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    pub async fn update(
        &self,
        post_id: &str,
        reply_id: &str,
        payload: &ReplyPatch,
    ) -> Result<Reply, ApiError> {
        self.begin();
        let path = format!("{}/{reply_id}", Self::path(post_id));
        let result = self
            .client
            .put(&path, payload)
            .await
            .and_then(decode_item::<Reply>);
        match result {
            Ok(reply) => {
                let _ = self.fetch_for_post(post_id).await;
                Ok(reply)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    pub async fn remove(&self, post_id: &str, reply_id: &str) -> Result<(), ApiError> {
        self.begin();
        let path = format!("{}/{reply_id}", Self::path(post_id));
        match self.client.delete(&path).await {
            Ok(_) => {
                let _ = self.fetch_for_post(post_id).await;
                Ok(())
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }
}

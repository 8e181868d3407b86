//! Notification store.

use crate::error::ApiError;
use crate::models::Notification;
use crate::store::{Resource, Store};
use serde_json::Value;

pub struct Notifications;

impl Resource for Notifications {
    const PATH: &'static str = "/notifications";
    type Item = Notification;
    type Create = Value;
    type Update = Value;
}

pub type NotificationStore = Store<Notifications>;

impl Store<Notifications> {
    /// Flip one notification to read, then resync the list so unread badges
    /// update everywhere.
    pub async fn mark_read(&self, id: &str) -> Result<(), ApiError> {
        self.client()
            .put(
                &format!("/notifications/{id}/read"),
                &serde_json::json!({}),
            )
            .await?;
        let _ = self.fetch_all().await;
        Ok(())
    }
}

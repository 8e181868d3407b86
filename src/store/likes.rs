//! Like toggle.
//!
//! The API only exposes create and delete primitives, so "like" is a
//! read-then-write: list the target's likes, delete ours if present,
//! otherwise create one. No local state is mutated before the round trip
//! completes, so a failure needs no rollback; the caller just shows the
//! error and the prior state stands.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Like, LikeTargetType};
use crate::store::decode_list;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeOutcome {
    Added,
    Removed,
}

#[derive(Clone)]
pub struct LikeStore {
    client: ApiClient,
}

impl LikeStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn type_slug(target_type: LikeTargetType) -> &'static str {
        match target_type {
            LikeTargetType::Post => "post",
            LikeTargetType::Reply => "reply",
        }
    }

    /// Current likes for one target.
    pub async fn for_target(
        &self,
        target_id: &str,
        target_type: LikeTargetType,
    ) -> Result<Vec<Like>, ApiError> {
        let path = format!(
            "/likes?target_id={}&target_type={}",
            urlencoding::encode(target_id),
            Self::type_slug(target_type)
        );
        self.client.get(&path).await.and_then(decode_list::<Like>)
    }

    /// Toggle the caller's like on a target. Idempotent as a user action:
    /// two sequential toggles restore the starting state.
    pub async fn toggle(
        &self,
        user_id: &str,
        target_id: &str,
        target_type: LikeTargetType,
    ) -> Result<LikeOutcome, ApiError> {
        let existing = self.for_target(target_id, target_type).await?;

        if let Some(like) = existing.iter().find(|l| l.user_id == user_id) {
            self.client.delete(&format!("/likes/{}", like.id)).await?;
            log::debug!("[likes] removed like on {target_id}");
            Ok(LikeOutcome::Removed)
        } else {
            self.client
                .post(
                    "/likes",
                    &serde_json::json!({
                        "user_id": user_id,
                        "target_id": target_id,
                        "target_type": Self::type_slug(target_type),
                    }),
                )
                .await?;
            log::debug!("[likes] added like on {target_id}");
            Ok(LikeOutcome::Added)
        }
    }
}

//! Post store.

use crate::error::ApiError;
use crate::models::{NewPost, Post, PostPatch};
use crate::store::{Resource, Store};

pub struct Posts;

impl Resource for Posts {
    const PATH: &'static str = "/posts";
    type Item = Post;
    type Create = NewPost;
    type Update = PostPatch;
}

pub type PostStore = Store<Posts>;

impl Store<Posts> {
    /// Count a view on a post. Fire-and-forget from the UI's perspective, so
    /// the collection is not refetched.
    pub async fn record_view(&self, id: &str) -> Result<(), ApiError> {
        self.client()
            .post(&format!("/posts/{id}/views"), &serde_json::json!({}))
            .await
            .map(|_| ())
    }
}

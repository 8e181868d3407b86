//! Like toggle against a tiny in-memory likes backend, exercising the full
//! read-then-write round trip each time.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use unburden::auth::TokenStore;
use unburden::client::{ApiClient, RetryPolicy};
use unburden::models::LikeTargetType;
use unburden::store::likes::{LikeOutcome, LikeStore};
use unburden::transport::{
    HttpRequest, HttpResponse, Method, RequestBody, Transport, TransportError,
};

#[derive(Clone, Debug)]
struct StoredLike {
    id: u64,
    user_id: String,
    target_id: String,
}

/// Minimal likes API: list by target, create, delete by id.
#[derive(Clone, Default)]
struct LikesBackend {
    likes: Arc<Mutex<Vec<StoredLike>>>,
    next_id: Arc<Mutex<u64>>,
}

impl LikesBackend {
    fn count_for(&self, user_id: &str, target_id: &str) -> usize {
        self.likes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id && l.target_id == target_id)
            .count()
    }

    fn json(like: &StoredLike) -> serde_json::Value {
        serde_json::json!({
            "id": like.id.to_string(),
            "user_id": like.user_id,
            "target_id": like.target_id,
            "target_type": "post",
        })
    }

    fn respond(body: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: serde_json::to_vec(&body).unwrap(),
        }
    }
}

#[async_trait]
impl Transport for LikesBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = request
            .url
            .strip_prefix("http://api.test/api")
            .unwrap_or(&request.url);

        match (request.method, path) {
            (Method::Get, p) if p.starts_with("/likes?") => {
                let target_id = p
                    .split('&')
                    .find_map(|kv| kv.split('=').nth(1).filter(|_| kv.contains("target_id")))
                    .unwrap_or_default()
                    .to_string();
                let likes = self.likes.lock().unwrap();
                let body: Vec<_> = likes
                    .iter()
                    .filter(|l| l.target_id == target_id)
                    .map(Self::json)
                    .collect();
                Ok(Self::respond(serde_json::Value::Array(body)))
            }
            (Method::Post, "/likes") => {
                let RequestBody::Json(payload) = &request.body else {
                    return Err(TransportError("expected json body".into()));
                };
                let mut next_id = self.next_id.lock().unwrap();
                *next_id += 1;
                let like = StoredLike {
                    id: *next_id,
                    user_id: payload["user_id"].as_str().unwrap_or_default().to_string(),
                    target_id: payload["target_id"].as_str().unwrap_or_default().to_string(),
                };
                let body = Self::json(&like);
                self.likes.lock().unwrap().push(like);
                Ok(Self::respond(body))
            }
            (Method::Delete, p) if p.starts_with("/likes/") => {
                let id: u64 = p["/likes/".len()..].parse().unwrap_or_default();
                self.likes.lock().unwrap().retain(|l| l.id != id);
                Ok(Self::respond(serde_json::json!({})))
            }
            _ => Err(TransportError(format!("unexpected request: {path}"))),
        }
    }
}

fn store_over(backend: &LikesBackend) -> LikeStore {
    let client = ApiClient::with_transport(
        "http://api.test/api",
        TokenStore::default(),
        RetryPolicy {
            retries: 0,
            retry_delay: std::time::Duration::from_millis(1),
        },
        Arc::new(backend.clone()),
    );
    LikeStore::new(client)
}

#[tokio::test]
async fn single_toggle_leaves_exactly_one_like() {
    let backend = LikesBackend::default();
    let store = store_over(&backend);

    let outcome = store
        .toggle("user-1", "post-9", LikeTargetType::Post)
        .await
        .unwrap();

    assert_eq!(outcome, LikeOutcome::Added);
    assert_eq!(backend.count_for("user-1", "post-9"), 1);
}

#[tokio::test]
async fn double_toggle_nets_to_zero_likes() {
    let backend = LikesBackend::default();
    let store = store_over(&backend);

    let first = store
        .toggle("user-1", "post-9", LikeTargetType::Post)
        .await
        .unwrap();
    let second = store
        .toggle("user-1", "post-9", LikeTargetType::Post)
        .await
        .unwrap();

    assert_eq!(first, LikeOutcome::Added);
    assert_eq!(second, LikeOutcome::Removed);
    assert_eq!(backend.count_for("user-1", "post-9"), 0);
}

#[tokio::test]
async fn toggle_only_touches_the_callers_like() {
    let backend = LikesBackend::default();
    let store = store_over(&backend);

    store
        .toggle("user-1", "post-9", LikeTargetType::Post)
        .await
        .unwrap();
    store
        .toggle("user-2", "post-9", LikeTargetType::Post)
        .await
        .unwrap();
    // user-2 unlikes; user-1's like must survive.
    store
        .toggle("user-2", "post-9", LikeTargetType::Post)
        .await
        .unwrap();

    assert_eq!(backend.count_for("user-1", "post-9"), 1);
    assert_eq!(backend.count_for("user-2", "post-9"), 0);
}

//! Admin dashboard metrics.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::DashboardMetrics;
use serde_json::Value;

#[derive(Clone)]
pub struct DashboardStore {
    client: ApiClient,
}

impl DashboardStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the per-entity counts concurrently. A failing section fails the
    /// whole metrics load; the dashboard shows stale numbers rather than a
    /// partially zeroed mix.
    pub async fn fetch_metrics(&self) -> Result<DashboardMetrics, ApiError> {
        let (users, posts, replies, reports) = futures::join!(
            self.client.get("/dashboard/users"),
            self.client.get("/dashboard/posts"),
            self.client.get("/dashboard/replies"),
            self.client.get("/dashboard/reports"),
        );

        Ok(DashboardMetrics {
            users: count_of(users?)?,
            posts: count_of(posts?)?,
            replies: count_of(replies?)?,
            reports: count_of(reports?)?,
        })
    }
}

/// Accepts `{"count": n}` or a bare number; anything else is an error so a
/// renamed server field cannot render as a silently zeroed dashboard.
fn count_of(value: Value) -> Result<u64, ApiError> {
    value
        .get("count")
        .and_then(Value::as_u64)
        .or_else(|| value.as_u64())
        .ok_or_else(|| ApiError::Unknown {
            raw: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_accepts_wrapped_and_bare_numbers() {
        assert_eq!(count_of(serde_json::json!({"count": 12})).unwrap(), 12);
        assert_eq!(count_of(serde_json::json!(7)).unwrap(), 7);
    }

    #[test]
    fn unexpected_metrics_shape_is_an_error() {
        let err = count_of(serde_json::json!({"total": 3})).unwrap_err();
        assert!(matches!(err, ApiError::Unknown { .. }));
    }
}

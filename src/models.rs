//! Wire models mirrored from the platform API.
//!
//! These are plain records; every authoritative invariant (uniqueness,
//! referential integrity, content filtering) lives server-side. Collections a
//! given endpoint omits deserialize to their defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Moderator,
    Admin,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    /// Raw content as submitted.
    pub content: String,
    /// Content after the server-side profanity filter ran.
    pub filtered_content: String,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub replies: Vec<Reply>,
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub views: u64,
    pub created_at: DateTime<Utc>,
}

/// Same shape as a post, scoped to a parent and possibly nested.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub filtered_content: String,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub children: Vec<Reply>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeTargetType {
    Post,
    Reply,
}

/// At most one like per (user, target); the server enforces it, the client
/// preserves it by reading existing likes before toggling.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Like {
    pub id: String,
    pub user_id: String,
    pub target_id: String,
    pub target_type: LikeTargetType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    Harassment,
    SelfHarm,
    Spam,
    Misinformation,
    Other,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub reporter_id: String,
    pub target_id: String,
    pub target_type: LikeTargetType,
    pub category: ReportCategory,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// A banned term.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BadWord {
    pub id: String,
    pub word: String,
}

/// An approved replacement; many good words map onto one bad word.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GoodWord {
    pub id: String,
    pub word: String,
    pub bad_word_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub read: bool,
    #[serde(default)]
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub users: u64,
    pub posts: u64,
    pub replies: u64,
    pub reports: u64,
}

// --- Request payloads -------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Partial profile update; absent fields stay untouched server-side.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewPost {
    pub author_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewReply {
    pub author_id: String,
    pub content: String,
    /// Parent reply when nesting, `None` for a top-level reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ReplyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewReport {
    pub reporter_id: String,
    pub target_id: String,
    pub target_type: LikeTargetType,
    pub category: ReportCategory,
    pub message: String,
}

/// Result of running content through the server-side filter.
#[derive(Clone, Debug, Deserialize)]
pub struct WordCheckResult {
    pub clean: bool,
    /// Content with banned terms replaced by their approved good words.
    pub filtered: String,
    /// The banned terms that matched, for client-side highlighting.
    #[serde(default)]
    pub matches: Vec<String>,
}

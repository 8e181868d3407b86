//! Two-tier profanity word list.
//!
//! Bad words are the banned terms; good words are their approved
//! replacements, many-to-one onto a bad word. The matching itself runs
//! server-side; `check` only ships content to the filter endpoint and hands
//! back what matched, for highlight/replace in the composer.

use crate::error::ApiError;
use crate::models::{BadWord, GoodWord, WordCheckResult};
use crate::store::{decode_item, Resource, Store};
use crate::transport::FilePart;
use serde_json::Value;

pub struct BadWords;

impl Resource for BadWords {
    const PATH: &'static str = "/badwords";
    type Item = BadWord;
    // `{"word": "..."}` both ways.
    type Create = Value;
    type Update = Value;
}

pub type BadWordStore = Store<BadWords>;

pub struct GoodWords;

impl Resource for GoodWords {
    const PATH: &'static str = "/goodwords";
    type Item = GoodWord;
    // `{"word": "...", "bad_word_id": "..."}`.
    type Create = Value;
    type Update = Value;
}

pub type GoodWordStore = Store<GoodWords>;

impl Store<BadWords> {
    /// Run content through the server-side filter.
    pub async fn check(&self, content: &str) -> Result<WordCheckResult, ApiError> {
        let value = self
            .client()
            .post("/badwords/check", &serde_json::json!({ "content": content }))
            .await?;
        decode_item(value)
    }

    /// Bulk import a word list file (CSV/XLSX, the server decides). Uploaded
    /// as multipart, then the collection is refetched.
    pub async fn bulk_import(&self, file_name: &str, bytes: Vec<u8>) -> Result<u64, ApiError> {
        let part = FilePart {
            name: "file".to_string(),
            file_name: file_name.to_string(),
            bytes,
        };
        let value = self.client().upload("/badwords/bulk", part).await?;
        let imported = value
            .get("imported")
            .and_then(Value::as_u64)
            .unwrap_or_default();
        log::info!("[words] bulk import accepted {imported} entries");
        let _ = self.fetch_all().await;
        Ok(imported)
    }
}

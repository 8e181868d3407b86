//! Tag store.

use crate::models::Tag;
use crate::store::{Resource, Store};
use serde_json::Value;

pub struct Tags;

impl Resource for Tags {
    const PATH: &'static str = "/tags";
    type Item = Tag;
    // Tags are `{"name": "..."}` both ways; no dedicated payload types.
    type Create = Value;
    type Update = Value;
}

pub type TagStore = Store<Tags>;

use bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A person record. Only `first` is known; every other field the store
/// returns is kept as-is in `rest`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Person {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first: String,
    #[serde(flatten)]
    pub rest: Document,
}

impl Person {
    pub fn new(first: impl Into<String>) -> Self {
        Self {
            id: None,
            first: first.into(),
            rest: Document::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<bson::Bson>) -> Self {
        self.rest.insert(key, value);
        self
    }

    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

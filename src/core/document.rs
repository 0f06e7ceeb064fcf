//! Remote document store abstractions

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;

/// Untyped document fields as returned by a store.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Timestamp field value. Fixed millisecond precision keeps stamps ordered
/// when compared as strings.
pub fn timestamp_value(at: DateTime<Utc>) -> serde_json::Value {
    serde_json::Value::String(at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// A raw document: store-assigned id plus its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub fields: Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    pub order_by: String,
    pub direction: Direction,
    pub limit: Option<usize>,
}

impl CollectionQuery {
    pub fn newest_first(field: &str) -> Self {
        Self {
            order_by: field.to_string(),
            direction: Direction::Desc,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sorts and truncates documents in place. Used by backends that cannot
    /// order on the storage side. Documents missing the field sort last.
    pub fn apply(&self, docs: &mut Vec<Document>) {
        docs.sort_by(|a, b| {
            match (a.fields.get(&self.order_by), b.fields.get(&self.order_by)) {
                (Some(x), Some(y)) => {
                    let ord = compare_values(x, y);
                    match self.direction {
                        Direction::Asc => ord,
                        Direction::Desc => ord.reverse(),
                    }
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
        if let Some(limit) = self.limit {
            docs.truncate(limit);
        }
    }
}

fn compare_values(a: &serde_json::Value, b: &serde_json::Value) -> Ordering {
    use serde_json::Value;
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// The remote collection store collaborator.
///
/// Catalog loading only reads through `query_collection` and `get_by_id`; the
/// write operations serve the admin surface and lead capture.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn query_collection(
        &self,
        collection: &str,
        query: &CollectionQuery,
    ) -> Result<Vec<Document>>;

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Creates a document and returns the id the store generated for it.
    async fn create(&self, collection: &str, fields: Fields) -> Result<String>;

    /// Merges `fields` into an existing document.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}

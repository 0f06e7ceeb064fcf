//! Company activity posts: gallery photos and blog updates.

use crate::core::document::{CollectionQuery, Document, DocumentStore};
use crate::core::source::CREATED_AT_FIELD;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActivityCategory {
    #[default]
    Gallery,
    Blog,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 2] = [ActivityCategory::Gallery, ActivityCategory::Blog];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Gallery => "Gallery",
            ActivityCategory::Blog => "Blog",
        }
    }
}

impl Display for ActivityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gallery" => Ok(ActivityCategory::Gallery),
            "blog" => Ok(ActivityCategory::Blog),
            _ => Err(anyhow::anyhow!("Invalid activity category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    /// `None` for posts whose category is missing or unknown. Those never
    /// match a category filter.
    pub category: Option<ActivityCategory>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Activity {
    /// Normalizes a raw store document. Missing fields become empty values.
    pub fn from_document(doc: &Document) -> Self {
        let fields = &doc.fields;
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

        Activity {
            id: doc.id.clone(),
            title: text("title").unwrap_or_default(),
            description: text("description").unwrap_or_default(),
            image_url: text("imageUrl").filter(|s| !s.trim().is_empty()),
            category: text("category").and_then(|c| c.parse().ok()),
            created_at: fields.get(CREATED_AT_FIELD).and_then(parse_created_at),
        }
    }
}

/// Accepts RFC 3339 strings and `{seconds}` / `{_seconds}` timestamp objects.
fn parse_created_at(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            DateTime::from_timestamp(seconds, 0)
        }
        _ => None,
    }
}

/// All activity posts, newest first.
pub async fn load_activities(store: &dyn DocumentStore, collection: &str) -> Result<Vec<Activity>> {
    let docs = store
        .query_collection(collection, &CollectionQuery::newest_first(CREATED_AT_FIELD))
        .await
        .with_context(|| format!("Failed to load activities from {collection}"))?;
    debug!("Loaded {} activities", docs.len());
    Ok(docs.iter().map(Activity::from_document).collect())
}

/// Posts in `category`, keeping their order.
pub fn filter_by_category(activities: &[Activity], category: ActivityCategory) -> Vec<&Activity> {
    activities
        .iter()
        .filter(|a| a.category == Some(category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::Fields;
    use crate::store::memory::MemoryDocumentStore;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected an object"),
        }
    }

    #[test]
    fn test_from_document_normalizes_fields() {
        let doc = Document {
            id: "a1".to_string(),
            fields: fields(json!({
                "title": "Handover at Mirpur DOHS",
                "imageUrl": "https://img/handover.jpg",
                "category": "blog",
                "createdAt": { "seconds": 1_767_225_600, "nanoseconds": 0 }
            })),
        };
        let activity = Activity::from_document(&doc);
        assert_eq!(activity.category, Some(ActivityCategory::Blog));
        assert_eq!(activity.description, "");
        assert_eq!(
            activity.created_at.map(|d| d.to_rfc3339()),
            Some("2026-01-01T00:00:00+00:00".to_string())
        );

        let sparse = Activity::from_document(&Document {
            id: "a2".to_string(),
            fields: fields(json!({ "category": "Event", "imageUrl": "" })),
        });
        assert_eq!(sparse.category, None);
        assert_eq!(sparse.image_url, None);
        assert_eq!(sparse.created_at, None);
    }

    #[tokio::test]
    async fn test_load_and_filter_by_category() {
        let store = MemoryDocumentStore::new();
        for (title, category, created) in [
            ("Site visit", "Gallery", "2026-01-10T10:00:00.000Z"),
            ("Market update", "Blog", "2026-02-01T10:00:00.000Z"),
            ("Foundation pour", "Gallery", "2026-03-15T10:00:00.000Z"),
            ("Untagged", "Other", "2026-04-01T10:00:00.000Z"),
        ] {
            store
                .create(
                    "activities",
                    fields(json!({ "title": title, "category": category, "createdAt": created })),
                )
                .await
                .unwrap();
        }

        let activities = load_activities(&store, "activities").await.unwrap();
        assert_eq!(activities.len(), 4);

        let gallery: Vec<_> = filter_by_category(&activities, ActivityCategory::Gallery)
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(gallery, vec!["Foundation pour", "Site visit"]);

        let blog = filter_by_category(&activities, ActivityCategory::Blog);
        assert_eq!(blog.len(), 1);
        assert_eq!(blog[0].title, "Market update");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("GALLERY".parse::<ActivityCategory>().unwrap(), ActivityCategory::Gallery);
        assert!("news".parse::<ActivityCategory>().is_err());
        assert_eq!(ActivityCategory::default(), ActivityCategory::Gallery);
    }
}

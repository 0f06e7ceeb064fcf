use crate::core::document::{CollectionQuery, Document, DocumentStore, Fields};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

type Collection = HashMap<String, Fields>;

/// In-memory document store, one map per collection.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<Mutex<HashMap<String, Collection>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query_collection(
        &self,
        collection: &str,
        query: &CollectionQuery,
    ) -> Result<Vec<Document>> {
        let collections = self.inner.lock().await;
        let mut docs: Vec<Document> = collections
            .get(collection)
            .map(|c| {
                c.iter()
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        query.apply(&mut docs);
        debug!("Memory QUERY {} returned {} documents", collection, docs.len());
        Ok(docs)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.inner.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|c| c.get(id))
            .map(|fields| Document {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let mut collections = self.inner.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        debug!("Memory CREATE {}/{}", collection, id);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let mut collections = self.inner.lock().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| anyhow!("Document not found: {}/{}", collection, id))?;
        existing.extend(fields);
        debug!("Memory UPDATE {}/{}", collection, id);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self.inner.lock().await;
        if let Some(c) = collections.get_mut(collection) {
            c.remove(id);
        }
        debug!("Memory DELETE {}/{}", collection, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("Expected an object"),
        }
    }

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let store = MemoryDocumentStore::new();

        let id = store
            .create("projects", fields(json!({ "title": "A", "sqft": 10 })))
            .await
            .unwrap();
        let doc = store.get_by_id("projects", &id).await.unwrap().unwrap();
        assert_eq!(doc.fields.get("title"), Some(&json!("A")));

        store
            .update("projects", &id, fields(json!({ "title": "B" })))
            .await
            .unwrap();
        let doc = store.get_by_id("projects", &id).await.unwrap().unwrap();
        assert_eq!(doc.fields.get("title"), Some(&json!("B")));
        assert_eq!(doc.fields.get("sqft"), Some(&json!(10)));

        store.delete("projects", &id).await.unwrap();
        assert!(store.get_by_id("projects", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let store = MemoryDocumentStore::new();
        let result = store
            .update("projects", "nope", fields(json!({ "title": "B" })))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        store
            .create("leads", fields(json!({ "name": "X" })))
            .await
            .unwrap();

        let query = CollectionQuery::newest_first("createdAt");
        assert!(store.query_collection("projects", &query).await.unwrap().is_empty());
        assert_eq!(store.query_collection("leads", &query).await.unwrap().len(), 1);
    }
}

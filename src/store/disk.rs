use crate::core::document::{CollectionQuery, Document, DocumentStore, Fields};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Document store persisted in a local fjall keyspace, one partition per
/// collection. Documents are stored as JSON-encoded field maps keyed by id.
#[derive(Clone)]
pub struct DiskDocumentStore {
    keyspace: Arc<Keyspace>,
}

impl DiskDocumentStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create store directory: {}", path.display()))?;
        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        debug!("Opened disk store at {}", path.display());
        Ok(Self {
            keyspace: Arc::new(keyspace),
        })
    }

    fn partition(&self, collection: &str) -> Result<PartitionHandle> {
        self.keyspace
            .open_partition(collection, PartitionCreateOptions::default())
            .with_context(|| format!("Failed to open collection: {collection}"))
    }

    /// Each CLI invocation is its own process, so writes are synced before
    /// returning.
    fn persist(&self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncData)
            .context("Failed to persist store")
    }
}

fn decode(id: &[u8], value: &[u8]) -> Result<Document> {
    Ok(Document {
        id: String::from_utf8(id.to_vec()).context("Document id is not UTF-8")?,
        fields: serde_json::from_slice(value).context("Failed to decode document")?,
    })
}

#[async_trait]
impl DocumentStore for DiskDocumentStore {
    async fn query_collection(
        &self,
        collection: &str,
        query: &CollectionQuery,
    ) -> Result<Vec<Document>> {
        let partition = self.partition(collection)?;
        let mut docs = Vec::new();
        for item in partition.iter() {
            let (key, value) = item?;
            docs.push(decode(&key, &value)?);
        }
        query.apply(&mut docs);
        debug!("Disk QUERY {} returned {} documents", collection, docs.len());
        Ok(docs)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let partition = self.partition(collection)?;
        match partition.get(id.as_bytes())? {
            Some(value) => Ok(Some(decode(id.as_bytes(), &value)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String> {
        let partition = self.partition(collection)?;
        let id = uuid::Uuid::new_v4().simple().to_string();
        partition.insert(id.as_bytes(), serde_json::to_vec(&fields)?)?;
        self.persist()?;
        debug!("Disk CREATE {}/{}", collection, id);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let partition = self.partition(collection)?;
        let existing = partition
            .get(id.as_bytes())?
            .ok_or_else(|| anyhow!("Document not found: {}/{}", collection, id))?;
        let mut merged: Fields =
            serde_json::from_slice(&existing).context("Failed to decode document")?;
        merged.extend(fields);
        partition.insert(id.as_bytes(), serde_json::to_vec(&merged)?)?;
        self.persist()?;
        debug!("Disk UPDATE {}/{}", collection, id);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let partition = self.partition(collection)?;
        partition.remove(id.as_bytes())?;
        self.persist()?;
        debug!("Disk DELETE {}/{}", collection, id);
        Ok(())
    }
}

//! Write access to the listings collection for the admin surface.

use crate::core::document::{DocumentStore, Fields, timestamp_value};
use crate::core::listing::{ListingRecord, ListingStatus, PropertyType};
use crate::core::source::CREATED_AT_FIELD;
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

const UPDATED_AT_FIELD: &str = "updatedAt";

/// Fields to change on a listing. `None` leaves a field as it is; for
/// `beds` and `baths`, `Some(None)` clears the stored count.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baths: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqft: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brochure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ListingPatch {
    pub fn is_empty(&self) -> bool {
        self.to_fields().is_empty()
    }

    fn to_fields(&self) -> Fields {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Fields::new(),
        }
    }
}

/// Status a listing moves to when its sold flag is toggled.
pub fn toggled_status(current: ListingStatus) -> ListingStatus {
    match current {
        ListingStatus::Sold => ListingStatus::ForSale,
        _ => ListingStatus::Sold,
    }
}

pub struct ProjectEditor {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl ProjectEditor {
    pub fn new(store: Arc<dyn DocumentStore>, collection: &str) -> Self {
        Self {
            store,
            collection: collection.to_string(),
        }
    }

    /// Creates a listing and returns its store id. The id on `record` is
    /// ignored.
    pub async fn add(&self, record: &ListingRecord) -> Result<String> {
        self.add_at(record, Utc::now()).await
    }

    async fn add_at(&self, record: &ListingRecord, at: DateTime<Utc>) -> Result<String> {
        let mut fields = record.to_fields();
        fields.insert(CREATED_AT_FIELD.to_string(), timestamp_value(at));
        fields.insert(UPDATED_AT_FIELD.to_string(), timestamp_value(at));

        let id = self
            .store
            .create(&self.collection, fields)
            .await
            .with_context(|| format!("Failed to create listing: {}", record.title))?;
        debug!("Created listing {} ({})", id, record.title);
        Ok(id)
    }

    pub async fn update(&self, id: &str, patch: &ListingPatch) -> Result<()> {
        if patch.is_empty() {
            return Err(anyhow!("Nothing to update for listing {}", id));
        }
        let mut fields = patch.to_fields();
        fields.insert(UPDATED_AT_FIELD.to_string(), timestamp_value(Utc::now()));

        self.store
            .update(&self.collection, id, fields)
            .await
            .with_context(|| format!("Failed to update listing: {id}"))?;
        debug!("Updated listing {}", id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store
            .delete(&self.collection, id)
            .await
            .with_context(|| format!("Failed to delete listing: {id}"))?;
        debug!("Deleted listing {}", id);
        Ok(())
    }

    /// Flips a listing between Sold and For Sale, returning the new status.
    pub async fn toggle_sold(&self, id: &str) -> Result<ListingStatus> {
        let doc = self
            .store
            .get_by_id(&self.collection, id)
            .await
            .with_context(|| format!("Failed to fetch listing: {id}"))?
            .ok_or_else(|| anyhow!("Listing not found: {}", id))?;
        let current = ListingRecord::from_document(&doc).status;
        let next = toggled_status(current);

        let patch = ListingPatch {
            status: Some(next),
            ..Default::default()
        };
        self.update(id, &patch).await?;
        Ok(next)
    }

    /// Creates every record concurrently, calling `on_done` after each one.
    /// Creation times step back one second per record so a newest-first
    /// read returns them in input order. If any create fails, the listings
    /// already written are deleted again and the error is returned.
    pub async fn seed(
        &self,
        records: &[ListingRecord],
        on_done: &(dyn Fn() + Sync),
    ) -> Result<Vec<String>> {
        let now = Utc::now();
        let futures = records.iter().enumerate().map(|(i, record)| async move {
            let at = now - Duration::seconds(i as i64);
            let result = self.add_at(record, at).await;
            on_done();
            result
        });

        let mut ids = Vec::with_capacity(records.len());
        let mut failure = None;
        for result in join_all(futures).await {
            match result {
                Ok(id) => ids.push(id),
                Err(e) if failure.is_none() => failure = Some(e),
                Err(e) => debug!("Additional seed failure: {:#}", e),
            }
        }

        let Some(error) = failure else {
            return Ok(ids);
        };
        for id in &ids {
            if let Err(e) = self.delete(id).await {
                warn!("Failed to roll back seeded listing {}: {:#}", id, e);
            }
        }
        Err(error.context(format!(
            "Seeding failed, rolled back {} created listings",
            ids.len()
        )))
    }
}

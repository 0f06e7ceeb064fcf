//! Lead capture: contact requests written to the leads collection.

use crate::core::document::{CollectionQuery, DocumentStore, Fields, timestamp_value};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const TIMESTAMP_FIELD: &str = "timestamp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

/// A lead as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredLead {
    pub id: String,
    pub lead: Lead,
    pub timestamp: Option<String>,
}

impl Lead {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("A name is required");
        }
        if !self.email.contains('@') {
            bail!("Invalid email address: {}", self.email);
        }
        if self.message.trim().is_empty() {
            bail!("A message is required");
        }
        Ok(())
    }
}

/// Writes a lead and returns its id.
pub async fn submit_lead(store: &dyn DocumentStore, collection: &str, lead: &Lead) -> Result<String> {
    lead.validate()?;

    let mut fields = match serde_json::to_value(lead)? {
        Value::Object(map) => map,
        _ => Fields::new(),
    };
    fields.insert(
        TIMESTAMP_FIELD.to_string(),
        timestamp_value(chrono::Utc::now()),
    );

    let id = store
        .create(collection, fields)
        .await
        .context("Failed to submit lead")?;
    debug!("Stored lead {} from {}", id, lead.email);
    Ok(id)
}

/// All leads, newest first. Documents that are not leads are skipped.
pub async fn list_leads(store: &dyn DocumentStore, collection: &str) -> Result<Vec<StoredLead>> {
    let docs = store
        .query_collection(collection, &CollectionQuery::newest_first(TIMESTAMP_FIELD))
        .await
        .context("Failed to load leads")?;

    Ok(docs
        .into_iter()
        .filter_map(|doc| {
            let timestamp = doc
                .fields
                .get(TIMESTAMP_FIELD)
                .and_then(Value::as_str)
                .map(str::to_string);
            match serde_json::from_value::<Lead>(Value::Object(doc.fields)) {
                Ok(lead) => Some(StoredLead {
                    id: doc.id,
                    lead,
                    timestamp,
                }),
                Err(e) => {
                    debug!("Skipping malformed lead {}: {}", doc.id, e);
                    None
                }
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryDocumentStore;

    fn lead(name: &str) -> Lead {
        Lead {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            message: "Interested in Purbachal plots".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_and_list_leads() {
        let store = MemoryDocumentStore::new();
        let id = submit_lead(&store, "leads", &lead("Rahim")).await.unwrap();

        let leads = list_leads(&store, "leads").await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].id, id);
        assert_eq!(leads[0].lead, lead("Rahim"));
        assert!(leads[0].timestamp.is_some());
    }

    #[tokio::test]
    async fn test_list_leads_newest_first() {
        let store = MemoryDocumentStore::new();
        for (name, timestamp) in [
            ("Karim", "2026-02-10T09:00:00+00:00"),
            ("Rahim", "2026-03-05T18:30:00+00:00"),
            ("Nusrat", "2026-01-20T12:00:00+00:00"),
        ] {
            let mut fields = match serde_json::to_value(lead(name)).unwrap() {
                Value::Object(map) => map,
                _ => unreachable!(),
            };
            fields.insert(TIMESTAMP_FIELD.to_string(), Value::String(timestamp.to_string()));
            store.create("leads", fields).await.unwrap();
        }

        let leads = list_leads(&store, "leads").await.unwrap();
        let names: Vec<_> = leads.iter().map(|l| l.lead.name.as_str()).collect();
        assert_eq!(names, vec!["Rahim", "Karim", "Nusrat"]);
        assert_eq!(
            leads[0].timestamp.as_deref(),
            Some("2026-03-05T18:30:00+00:00")
        );
    }

    #[tokio::test]
    async fn test_invalid_lead_is_rejected_before_writing() {
        let store = MemoryDocumentStore::new();
        let mut bad = lead("Karim");
        bad.email = "not-an-email".to_string();

        assert!(submit_lead(&store, "leads", &bad).await.is_err());
        assert!(list_leads(&store, "leads").await.unwrap().is_empty());
    }
}

use crate::core::document::{CollectionQuery, Document, DocumentStore, Fields};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Client for a remote JSON document API.
///
/// Documents of a collection live under
/// `{base_url}/v1/collections/{collection}/documents`.
pub struct HttpDocumentStore {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct FieldsBody<'a> {
    fields: &'a Fields,
}

impl HttpDocumentStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("homelist/0.1")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!("{}/v1/collections/{}/documents", self.base_url, collection)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.documents_url(collection), id)
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<reqwest::Response> {
        let response = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {what}"))?;
        let status = response.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("{} returned {}: {}", what, status, body.trim()));
        }
        Ok(response)
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn query_collection(
        &self,
        collection: &str,
        query: &CollectionQuery,
    ) -> Result<Vec<Document>> {
        let url = self.documents_url(collection);
        debug!("Querying {} ordered by {} {}", url, query.order_by, query.direction);

        let mut params = vec![
            ("orderBy", query.order_by.clone()),
            ("direction", query.direction.to_string()),
        ];
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }

        let request_url = reqwest::Url::parse_with_params(&url, &params)
            .with_context(|| format!("Invalid store URL: {url}"))?;
        let response = self.send(self.client.get(request_url), &url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let body: QueryResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse documents from {url}"))?;
        debug!("Received {} documents from {}", body.documents.len(), url);
        Ok(body.documents)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let url = self.document_url(collection, id);
        let response = self.send(self.client.get(&url), &url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let doc: Document = response
            .json()
            .await
            .with_context(|| format!("Failed to parse document from {url}"))?;
        Ok(Some(doc))
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String> {
        let url = self.documents_url(collection);
        let response = self
            .send(self.client.post(&url).json(&FieldsBody { fields: &fields }), &url)
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(anyhow!("Collection not found: {}", collection));
        }
        let created: CreateResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse create response from {url}"))?;
        debug!("Created document {}/{}", collection, created.id);
        Ok(created.id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let url = self.document_url(collection, id);
        let response = self
            .send(self.client.patch(&url).json(&FieldsBody { fields: &fields }), &url)
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(anyhow!("Document not found: {}/{}", collection, id));
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let url = self.document_url(collection, id);
        self.send(self.client.delete(&url), &url).await?;
        Ok(())
    }
}

//! Catalog source selection: the remote store when it serves listings, the
//! bundled seed catalog otherwise.

use crate::core::document::{CollectionQuery, DocumentStore};
use crate::core::listing::ListingRecord;
use crate::core::seed::seed_catalog;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

/// Field the listings collection is ordered by, newest first.
pub const CREATED_AT_FIELD: &str = "createdAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No remote store is configured.
    Unconfigured,
    /// The remote store answered with no listings.
    Empty,
    /// The remote query failed.
    Unavailable,
}

impl Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FallbackReason::Unconfigured => "remote store is not configured",
            FallbackReason::Empty => "remote store has no listings",
            FallbackReason::Unavailable => "remote store is unavailable",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    Remote,
    Fallback(FallbackReason),
}

/// A loaded catalog. Which source served it only matters to presentation,
/// through [`Catalog::is_fallback`].
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub records: Vec<ListingRecord>,
    pub origin: CatalogOrigin,
}

impl Catalog {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, CatalogOrigin::Fallback(_))
    }
}

pub struct CatalogSource {
    store: Option<Arc<dyn DocumentStore>>,
    collection: String,
    seed: Vec<ListingRecord>,
}

impl CatalogSource {
    pub fn new(store: Option<Arc<dyn DocumentStore>>, collection: &str) -> Self {
        Self::with_seed(store, collection, seed_catalog())
    }

    pub fn with_seed(
        store: Option<Arc<dyn DocumentStore>>,
        collection: &str,
        seed: Vec<ListingRecord>,
    ) -> Self {
        Self {
            store,
            collection: collection.to_string(),
            seed,
        }
    }

    pub fn seed(&self) -> &[ListingRecord] {
        &self.seed
    }

    /// Loads every listing, newest first. Never fails: a missing store, an
    /// empty collection or any query error yields the seed catalog. There is
    /// no retry.
    pub async fn load_catalog(&self) -> Catalog {
        self.load(CollectionQuery::newest_first(CREATED_AT_FIELD), self.seed.clone())
            .await
    }

    /// The latest `limit` listings, falling back to the first `limit` seed
    /// listings.
    pub async fn featured(&self, limit: usize) -> Catalog {
        let fallback = self.seed.iter().take(limit).cloned().collect();
        self.load(
            CollectionQuery::newest_first(CREATED_AT_FIELD).with_limit(limit),
            fallback,
        )
        .await
    }

    async fn load(&self, query: CollectionQuery, fallback: Vec<ListingRecord>) -> Catalog {
        let fallback_catalog = |reason: FallbackReason| {
            debug!("Serving {} seed listings: {}", fallback.len(), reason);
            Catalog {
                records: fallback.clone(),
                origin: CatalogOrigin::Fallback(reason),
            }
        };

        let Some(store) = &self.store else {
            return fallback_catalog(FallbackReason::Unconfigured);
        };

        match store.query_collection(&self.collection, &query).await {
            Ok(docs) if docs.is_empty() => fallback_catalog(FallbackReason::Empty),
            Ok(docs) => {
                debug!(
                    "Loaded {} listings from collection {}",
                    docs.len(),
                    self.collection
                );
                Catalog {
                    records: docs.iter().map(ListingRecord::from_document).collect(),
                    origin: CatalogOrigin::Remote,
                }
            }
            Err(e) => {
                warn!(
                    "Failed to query listings from collection {}: {:#}",
                    self.collection, e
                );
                fallback_catalog(FallbackReason::Unavailable)
            }
        }
    }

    /// Looks up one listing by id, in the remote store first and then in the
    /// seed catalog.
    pub async fn find_listing(&self, id: &str) -> Option<ListingRecord> {
        if let Some(store) = &self.store {
            match store.get_by_id(&self.collection, id).await {
                Ok(Some(doc)) => return Some(ListingRecord::from_document(&doc)),
                Ok(None) => debug!("Listing {} not found in remote store", id),
                Err(e) => warn!("Failed to fetch listing {}: {:#}", id, e),
            }
        }
        self.seed.iter().find(|r| r.id == id).cloned()
    }
}

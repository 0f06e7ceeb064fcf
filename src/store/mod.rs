pub mod disk;
pub mod http;
pub mod memory;

use crate::core::config::{AppConfig, StoreConfig};
use crate::core::document::DocumentStore;
use anyhow::Result;
use disk::DiskDocumentStore;
use http::HttpDocumentStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Opens the store the configuration points at. `Ok(None)` means no store is
/// configured and callers run on the seed catalog.
pub fn open_store(config: &AppConfig) -> Result<Option<Arc<dyn DocumentStore>>> {
    let Some(store_config) = config.store.as_ref().filter(|s| s.is_configured()) else {
        debug!("No remote store configured");
        return Ok(None);
    };

    let store: Arc<dyn DocumentStore> = match store_config {
        StoreConfig::Http { base_url, api_key } => Arc::new(HttpDocumentStore::new(
            base_url,
            api_key.as_deref().unwrap_or_default(),
        )?),
        StoreConfig::Disk { path } => {
            let path = match path {
                Some(p) => PathBuf::from(p),
                None => config.default_data_path()?.join("store"),
            };
            Arc::new(DiskDocumentStore::open(&path)?)
        }
    };
    Ok(Some(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_store_unconfigured() {
        let config = AppConfig::default();
        assert!(open_store(&config).unwrap().is_none());

        let config = AppConfig {
            store: Some(StoreConfig::Http {
                base_url: "http://localhost:1".to_string(),
                api_key: Some("  ".to_string()),
            }),
            ..Default::default()
        };
        assert!(open_store(&config).unwrap().is_none());
    }

    #[test]
    fn test_open_store_backends() {
        let config = AppConfig {
            store: Some(StoreConfig::Http {
                base_url: "http://localhost:1".to_string(),
                api_key: Some("key".to_string()),
            }),
            ..Default::default()
        };
        assert!(open_store(&config).unwrap().is_some());

        let dir = tempdir().unwrap();
        let config = AppConfig {
            store: Some(StoreConfig::Disk {
                path: Some(dir.path().join("store").to_string_lossy().to_string()),
            }),
            ..Default::default()
        };
        assert!(open_store(&config).unwrap().is_some());
    }
}

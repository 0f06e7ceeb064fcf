use crate::core::facets::{AreaDefinition, FacetLayout, PriceBand};
use crate::core::view::FacetOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SiteConfig {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            name: "The Dream Homes & Constructions Ltd.".to_string(),
            phone: "+880 1708 364030".to_string(),
            email: "contact@dreamhomes.com.bd".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    Http {
        base_url: String,
        api_key: Option<String>,
    },
    Disk {
        path: Option<String>,
    },
}

impl StoreConfig {
    /// A remote store without credentials is treated as not configured.
    pub fn is_configured(&self) -> bool {
        match self {
            StoreConfig::Http { api_key, .. } => {
                api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
            }
            StoreConfig::Disk { .. } => true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CollectionsConfig {
    pub listings: String,
    pub leads: String,
    pub activities: String,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        CollectionsConfig {
            listings: "projects".to_string(),
            leads: "leads".to_string(),
            activities: "activities".to_string(),
        }
    }
}

fn default_areas() -> Vec<AreaDefinition> {
    ["Purbachal", "Mirpur DOHS", "Trust Green City", "Shagupta", "ECB Chattor"]
        .iter()
        .map(|name| AreaDefinition {
            name: name.to_string(),
            image: None,
        })
        .collect()
}

fn default_price_bands() -> Vec<PriceBand> {
    [
        ("Under 50 Lac", 0, 5_000_000),
        ("50 Lac - 1 Crore", 5_000_000, 10_000_000),
        ("1 Crore - 2 Crore", 10_000_000, 20_000_000),
        ("Above 2 Crore", 20_000_000, u64::MAX),
    ]
    .iter()
    .map(|(label, min, max)| PriceBand {
        label: label.to_string(),
        min: *min,
        max: *max,
    })
    .collect()
}

/// Commented example configuration, spelling out the built-in defaults.
pub const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default = "default_areas")]
    pub areas: Vec<AreaDefinition>,
    #[serde(default = "default_price_bands")]
    pub price_bands: Vec<PriceBand>,
    #[serde(default)]
    pub facets: FacetLayout,
    #[serde(default)]
    pub store: Option<StoreConfig>,
    #[serde(default)]
    pub collections: CollectionsConfig,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            site: SiteConfig::default(),
            areas: default_areas(),
            price_bands: default_price_bands(),
            facets: FacetLayout::default(),
            store: None,
            collections: CollectionsConfig::default(),
            data_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("bd", "dreamhomes", "homelist")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("bd", "dreamhomes", "homelist")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Writes [`EXAMPLE_CONFIG`] to `path`, creating parent directories. An
    /// existing file is never overwritten.
    pub fn write_example(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                anyhow::bail!("Configuration file already exists at {}", path.display())
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to create config file: {}", path.display()));
            }
        };
        file.write_all(EXAMPLE_CONFIG.as_bytes())
            .with_context(|| format!("Failed to write config file to {}", path.display()))?;
        debug!("Wrote example config to {}", path.display());
        Ok(())
    }

    /// The facet configuration handed to listing views.
    pub fn facet_options(&self) -> FacetOptions {
        FacetOptions {
            areas: self.areas.clone(),
            price_bands: self.price_bands.clone(),
            layout: self.facets,
        }
    }
}

//! Core catalog logic and abstractions

pub mod activity;
pub mod config;
pub mod document;
pub mod facets;
pub mod lead;
pub mod listing;
pub mod log;
pub mod money;
pub mod projects;
pub mod seed;
pub mod source;
pub mod view;

// Re-export main types for cleaner imports
pub use activity::{Activity, ActivityCategory};
pub use document::{CollectionQuery, Direction, Document, DocumentStore, Fields};
pub use facets::{
    AreaDefinition, Facet, FacetChange, FacetLayout, FacetSelection, PriceBand, apply_facets,
};
pub use listing::{ListingRecord, ListingStatus, PropertyType};
pub use money::parse_magnitude;
pub use source::{Catalog, CatalogOrigin, CatalogSource, FallbackReason};
pub use view::{FacetOptions, ListingSnapshot, ListingView, MountOutcome, ViewPhase};

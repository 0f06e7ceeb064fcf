//! The listing view model: one catalog load per mount, facet state, and the
//! filtered records handed to presentation.

use crate::core::facets::{
    AreaDefinition, FacetChange, FacetLayout, FacetSelection, PriceBand, apply_facets,
};
use crate::core::listing::ListingRecord;
use crate::core::source::{Catalog, CatalogSource};
use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Facet configuration a view is constructed with.
#[derive(Debug, Clone, Default)]
pub struct FacetOptions {
    pub areas: Vec<AreaDefinition>,
    pub price_bands: Vec<PriceBand>,
    pub layout: FacetLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Ready,
    /// Ready, but no listing passes the current facets.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    Loaded,
    Cancelled,
}

/// What presentation renders.
#[derive(Debug)]
pub struct ListingSnapshot<'a> {
    pub records: Vec<&'a ListingRecord>,
    pub loading: bool,
    pub is_fallback_source: bool,
}

pub struct ListingView {
    options: FacetOptions,
    selection: FacetSelection,
    catalog: Option<Catalog>,
}

impl ListingView {
    pub fn new(options: FacetOptions) -> Self {
        Self {
            options,
            selection: FacetSelection::default(),
            catalog: None,
        }
    }

    /// Loads the catalog for this view. If `cancel` fires first the load is
    /// abandoned and the view stays loading.
    pub async fn mount(&mut self, source: &CatalogSource, cancel: &CancellationToken) -> MountOutcome {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Listing view mount cancelled before the catalog loaded");
                MountOutcome::Cancelled
            }
            catalog = source.load_catalog() => {
                self.set_catalog(catalog);
                MountOutcome::Loaded
            }
        }
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        debug!(
            "Listing view ready with {} listings (fallback: {})",
            catalog.records.len(),
            catalog.is_fallback()
        );
        self.catalog = Some(catalog);
    }

    /// Applies one facet change. Changing a facet the layout hides is an
    /// error and leaves the selection untouched.
    pub fn set_facet(&mut self, change: FacetChange) -> Result<()> {
        self.options.layout.check(&change)?;
        debug!("Facet {} set to {:?}", change.name(), change);
        self.selection.apply(change);
        Ok(())
    }

    pub fn reset_facets(&mut self) {
        self.selection = FacetSelection::default();
    }

    pub fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    pub fn options(&self) -> &FacetOptions {
        &self.options
    }

    pub fn area_options(&self) -> Vec<&str> {
        if !self.options.layout.area {
            return Vec::new();
        }
        self.options.areas.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn band_options(&self) -> Vec<&str> {
        if !self.options.layout.price_band {
            return Vec::new();
        }
        self.options
            .price_bands
            .iter()
            .map(|b| b.label.as_str())
            .collect()
    }

    /// Filtered records, recomputed from the current catalog and selection.
    /// `None` while loading.
    pub fn records(&self) -> Option<Vec<&ListingRecord>> {
        let catalog = self.catalog.as_ref()?;
        let selection = self.options.layout.mask(&self.selection);
        Some(apply_facets(
            &catalog.records,
            &selection,
            &self.options.price_bands,
        ))
    }

    pub fn phase(&self) -> ViewPhase {
        match self.records() {
            None => ViewPhase::Loading,
            Some(records) if records.is_empty() => ViewPhase::Empty,
            Some(_) => ViewPhase::Ready,
        }
    }

    pub fn snapshot(&self) -> ListingSnapshot<'_> {
        let records = self.records();
        ListingSnapshot {
            loading: records.is_none(),
            records: records.unwrap_or_default(),
            is_fallback_source: self.catalog.as_ref().is_some_and(Catalog::is_fallback),
        }
    }
}

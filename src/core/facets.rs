//! Facet selection and the filter engine applied to catalog listings.

use crate::core::listing::{ListingRecord, ListingStatus, PropertyType};
use crate::core::money::parse_magnitude;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A named budget bracket, inclusive on both ends, in whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    pub label: String,
    pub min: u64,
    pub max: u64,
}

impl PriceBand {
    pub fn contains(&self, magnitude: u64) -> bool {
        self.min <= magnitude && magnitude <= self.max
    }
}

/// A recognized geographic area, offered as an area facet option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One facet's constraint. `All` places no constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet<T> {
    All,
    Is(T),
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::All
    }
}

impl<T> Facet<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Facet::All)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Facet::All => None,
            Facet::Is(v) => Some(v),
        }
    }
}

impl<T: Display> Display for Facet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facet::All => f.write_str("All"),
            Facet::Is(v) => v.fmt(f),
        }
    }
}

impl<T> FromStr for Facet<T>
where
    T: FromStr<Err = anyhow::Error>,
{
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Facet::All)
        } else {
            s.parse().map(Facet::Is)
        }
    }
}

/// Free-text facets (area, price band) keep the value as typed.
fn text_facet(value: &str) -> Facet<String> {
    if value.trim().eq_ignore_ascii_case("all") {
        Facet::All
    } else {
        Facet::Is(value.to_string())
    }
}

/// The user's current facet choices for one listing view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelection {
    pub property_type: Facet<PropertyType>,
    pub status: Facet<ListingStatus>,
    pub area: Facet<String>,
    /// Label of a configured [`PriceBand`].
    pub price_band: Facet<String>,
}

impl FacetSelection {
    pub fn is_unconstrained(&self) -> bool {
        self.property_type.is_all()
            && self.status.is_all()
            && self.area.is_all()
            && self.price_band.is_all()
    }

    pub fn apply(&mut self, change: FacetChange) {
        match change {
            FacetChange::Type(f) => self.property_type = f,
            FacetChange::Status(f) => self.status = f,
            FacetChange::Area(f) => self.area = f,
            FacetChange::PriceBand(f) => self.price_band = f,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetName {
    Type,
    Status,
    Area,
    PriceBand,
}

impl Display for FacetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FacetName::Type => "type",
            FacetName::Status => "status",
            FacetName::Area => "area",
            FacetName::PriceBand => "price_band",
        })
    }
}

impl FromStr for FacetName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "type" => Ok(FacetName::Type),
            "status" => Ok(FacetName::Status),
            "area" | "location" => Ok(FacetName::Area),
            "price_band" | "price" | "budget" => Ok(FacetName::PriceBand),
            _ => Err(anyhow::anyhow!("Unknown facet: {}", s)),
        }
    }
}

/// A single user action on one facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetChange {
    Type(Facet<PropertyType>),
    Status(Facet<ListingStatus>),
    Area(Facet<String>),
    PriceBand(Facet<String>),
}

impl FacetChange {
    pub fn parse(name: &str, value: &str) -> Result<Self> {
        let change = match name.parse::<FacetName>()? {
            FacetName::Type => FacetChange::Type(value.parse()?),
            FacetName::Status => FacetChange::Status(value.parse()?),
            FacetName::Area => FacetChange::Area(text_facet(value)),
            FacetName::PriceBand => FacetChange::PriceBand(text_facet(value)),
        };
        Ok(change)
    }

    pub fn name(&self) -> FacetName {
        match self {
            FacetChange::Type(_) => FacetName::Type,
            FacetChange::Status(_) => FacetName::Status,
            FacetChange::Area(_) => FacetName::Area,
            FacetChange::PriceBand(_) => FacetName::PriceBand,
        }
    }

    pub fn is_all(&self) -> bool {
        match self {
            FacetChange::Type(f) => f.is_all(),
            FacetChange::Status(f) => f.is_all(),
            FacetChange::Area(f) => f.is_all(),
            FacetChange::PriceBand(f) => f.is_all(),
        }
    }
}

/// Which optional facets a surface exposes. The type facet is always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetLayout {
    pub status: bool,
    pub area: bool,
    pub price_band: bool,
}

impl Default for FacetLayout {
    fn default() -> Self {
        Self {
            status: true,
            area: true,
            price_band: true,
        }
    }
}

impl FacetLayout {
    pub fn exposes(&self, facet: FacetName) -> bool {
        match facet {
            FacetName::Type => true,
            FacetName::Status => self.status,
            FacetName::Area => self.area,
            FacetName::PriceBand => self.price_band,
        }
    }

    /// Copy of `selection` with hidden facets forced to `All`.
    pub fn mask(&self, selection: &FacetSelection) -> FacetSelection {
        let mut masked = selection.clone();
        if !self.status {
            masked.status = Facet::All;
        }
        if !self.area {
            masked.area = Facet::All;
        }
        if !self.price_band {
            masked.price_band = Facet::All;
        }
        masked
    }

    pub fn check(&self, change: &FacetChange) -> Result<()> {
        if !change.is_all() && !self.exposes(change.name()) {
            bail!("The {} facet is not enabled for this view", change.name());
        }
        Ok(())
    }
}

/// Filters `records` by the conjunction of the selected facets.
///
/// Pure and order-preserving: survivors keep their relative input order and
/// are returned by reference. A price band label that is not in `bands`
/// places no constraint.
pub fn apply_facets<'a, I>(
    records: I,
    selection: &FacetSelection,
    bands: &[PriceBand],
) -> Vec<&'a ListingRecord>
where
    I: IntoIterator<Item = &'a ListingRecord>,
{
    let band = selection
        .price_band
        .value()
        .and_then(|label| bands.iter().find(|b| &b.label == label));

    records
        .into_iter()
        .filter(|record| {
            matches_type(record, &selection.property_type)
                && matches_status(record, &selection.status)
                && matches_area(record, &selection.area)
                && band.is_none_or(|b| b.contains(parse_magnitude(&record.price_range)))
        })
        .collect()
}

fn matches_type(record: &ListingRecord, facet: &Facet<PropertyType>) -> bool {
    facet.value().is_none_or(|t| record.property_type == *t)
}

fn matches_status(record: &ListingRecord, facet: &Facet<ListingStatus>) -> bool {
    facet.value().is_none_or(|s| record.status == *s)
}

// Case-sensitive containment.
fn matches_area(record: &ListingRecord, facet: &Facet<String>) -> bool {
    facet
        .value()
        .is_none_or(|area| record.location.contains(area.as_str()))
}

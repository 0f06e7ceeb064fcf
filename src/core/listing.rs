//! Listing records and the normalization of raw store documents into them.

use crate::core::document::{Document, Fields};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Residential,
    Commercial,
    Land,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [
        PropertyType::Residential,
        PropertyType::Commercial,
        PropertyType::Land,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Residential => "Residential",
            PropertyType::Commercial => "Commercial",
            PropertyType::Land => "Land",
        }
    }
}

impl Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "residential" => Ok(PropertyType::Residential),
            "commercial" => Ok(PropertyType::Commercial),
            "land" => Ok(PropertyType::Land),
            _ => Err(anyhow::anyhow!("Invalid property type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    #[serde(rename = "For Sale")]
    ForSale,
    #[serde(rename = "For Rent")]
    ForRent,
    Constructing,
    Sold,
}

impl ListingStatus {
    pub const ALL: [ListingStatus; 4] = [
        ListingStatus::ForSale,
        ListingStatus::ForRent,
        ListingStatus::Constructing,
        ListingStatus::Sold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::ForSale => "For Sale",
            ListingStatus::ForRent => "For Rent",
            ListingStatus::Constructing => "Constructing",
            ListingStatus::Sold => "Sold",
        }
    }
}

impl Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match normalized.as_str() {
            "forsale" | "sale" => Ok(ListingStatus::ForSale),
            "forrent" | "rent" => Ok(ListingStatus::ForRent),
            "constructing" => Ok(ListingStatus::Constructing),
            "sold" => Ok(ListingStatus::Sold),
            _ => Err(anyhow::anyhow!("Invalid listing status: {}", s)),
        }
    }
}

/// A catalog entry in its canonical shape.
///
/// Every record is normalized to this shape before filtering, whether it was
/// read from the remote store or taken from the bundled seed catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: String,
    pub title: String,
    /// Human-authored price text, e.g. "৳ 80 Lac - 1.2 Cr". Also the only
    /// input to price-band filtering.
    pub price_range: String,
    pub location: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: ListingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baths: Option<u32>,
    #[serde(default)]
    pub sqft: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brochure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl ListingRecord {
    /// Normalizes a raw store document. Never fails: missing or malformed
    /// fields fall back to defaults so the record is kept in the catalog.
    pub fn from_document(doc: &Document) -> Self {
        let fields = &doc.fields;

        let price_range = text_field(fields, "priceRange")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                fields
                    .get("price")
                    .and_then(Value::as_f64)
                    .map(|p| format!("{p}"))
            })
            .unwrap_or_default();

        let property_type = text_field(fields, "type")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                debug!("Listing {} has no recognizable type, assuming Residential", doc.id);
                PropertyType::Residential
            });

        let status = text_field(fields, "status")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                debug!("Listing {} has no recognizable status, assuming For Sale", doc.id);
                ListingStatus::ForSale
            });

        let mut gallery: Vec<String> = ["image2", "image3"]
            .iter()
            .filter_map(|key| text_field(fields, key))
            .filter(|s| !s.trim().is_empty())
            .collect();
        if let Some(Value::Array(items)) = fields.get("gallery") {
            gallery.extend(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .map(str::to_string),
            );
        }

        ListingRecord {
            id: doc.id.clone(),
            title: text_field(fields, "title").unwrap_or_default(),
            price_range,
            location: text_field(fields, "location").unwrap_or_default(),
            property_type,
            status,
            beds: count_field(fields, "beds"),
            baths: count_field(fields, "baths"),
            sqft: count_field(fields, "sqft").unwrap_or(0),
            image: text_field(fields, "image").filter(|s| !s.trim().is_empty()),
            gallery,
            brochure: text_field(fields, "brochure").filter(|s| !s.trim().is_empty()),
            features: text_field(fields, "features").filter(|s| !s.trim().is_empty()),
            description: text_field(fields, "description").unwrap_or_default(),
        }
    }

    /// Store fields for this record, without its id.
    pub fn to_fields(&self) -> Fields {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => {
                map.remove("id");
                map
            }
            _ => Fields::new(),
        }
    }

    /// Comma-separated `features` split into trimmed, non-empty entries.
    pub fn feature_list(&self) -> Vec<&str> {
        self.features
            .as_deref()
            .map(|f| {
                f.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Zero square footage means unspecified.
    pub fn area_sqft(&self) -> Option<u32> {
        (self.sqft > 0).then_some(self.sqft)
    }
}

fn text_field(fields: &Fields, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn count_field(fields: &Fields, key: &str) -> Option<u32> {
    match fields.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        match value {
            Value::Object(fields) => Document {
                id: id.to_string(),
                fields,
            },
            _ => panic!("Expected an object"),
        }
    }

    #[test]
    fn test_from_document_full_record() {
        let d = doc(
            "abc",
            json!({
                "title": "Lake View",
                "priceRange": "৳ 95 Lac - 1.4 Cr",
                "location": "Shagupta, Dhaka",
                "type": "Residential",
                "status": "Constructing",
                "beds": 3,
                "baths": 2,
                "sqft": 1800,
                "image": "https://img/1.jpg",
                "image2": "https://img/2.jpg",
                "features": "Lift, Generator, ,Parking",
                "description": "Ongoing project",
                "createdAt": "2024-01-01T00:00:00Z"
            }),
        );

        let record = ListingRecord::from_document(&d);
        assert_eq!(record.id, "abc");
        assert_eq!(record.title, "Lake View");
        assert_eq!(record.price_range, "৳ 95 Lac - 1.4 Cr");
        assert_eq!(record.property_type, PropertyType::Residential);
        assert_eq!(record.status, ListingStatus::Constructing);
        assert_eq!(record.beds, Some(3));
        assert_eq!(record.baths, Some(2));
        assert_eq!(record.sqft, 1800);
        assert_eq!(record.image.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(record.gallery, vec!["https://img/2.jpg".to_string()]);
        assert_eq!(record.feature_list(), vec!["Lift", "Generator", "Parking"]);
    }

    #[test]
    fn test_from_document_sparse_record_is_kept_with_defaults() {
        let d = doc("sparse", json!({ "title": "Plot", "beds": null, "type": "Castle" }));

        let record = ListingRecord::from_document(&d);
        assert_eq!(record.title, "Plot");
        assert_eq!(record.price_range, "");
        assert_eq!(record.location, "");
        assert_eq!(record.property_type, PropertyType::Residential);
        assert_eq!(record.status, ListingStatus::ForSale);
        assert_eq!(record.beds, None);
        assert_eq!(record.sqft, 0);
        assert_eq!(record.area_sqft(), None);
        assert!(record.image.is_none());
        assert!(record.feature_list().is_empty());
    }

    #[test]
    fn test_from_document_accepts_numeric_strings_and_price_number() {
        let d = doc(
            "n",
            json!({ "price": 4500000, "sqft": "1200", "baths": "2", "status": "for rent" }),
        );

        let record = ListingRecord::from_document(&d);
        assert_eq!(record.price_range, "4500000");
        assert_eq!(record.sqft, 1200);
        assert_eq!(record.baths, Some(2));
        assert_eq!(record.status, ListingStatus::ForRent);
    }

    #[test]
    fn test_to_fields_round_trips_through_normalization() {
        let d = doc(
            "x",
            json!({
                "title": "Office",
                "priceRange": "৳ 45k",
                "location": "ECB Chattor",
                "type": "Commercial",
                "status": "For Rent",
                "sqft": 1200,
                "description": "Corner unit"
            }),
        );
        let record = ListingRecord::from_document(&d);
        let fields = record.to_fields();

        assert!(!fields.contains_key("id"));
        assert_eq!(fields.get("type"), Some(&json!("Commercial")));
        assert_eq!(fields.get("status"), Some(&json!("For Rent")));
        assert_eq!(fields.get("priceRange"), Some(&json!("৳ 45k")));
        assert_eq!(ListingRecord::from_document(&doc("x", Value::Object(fields))), record);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("For Sale".parse::<ListingStatus>().unwrap(), ListingStatus::ForSale);
        assert_eq!("for-rent".parse::<ListingStatus>().unwrap(), ListingStatus::ForRent);
        assert_eq!("SOLD".parse::<ListingStatus>().unwrap(), ListingStatus::Sold);
        assert!("Leased".parse::<ListingStatus>().is_err());
        assert_eq!("land".parse::<PropertyType>().unwrap(), PropertyType::Land);
    }
}

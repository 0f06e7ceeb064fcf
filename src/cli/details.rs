use super::ui;
use crate::core::listing::ListingRecord;
use crate::core::source::CatalogSource;
use anyhow::{Result, bail};

pub fn render_details(record: &ListingRecord) -> String {
    let price = if record.price_range.trim().is_empty() {
        "Contact for Quote"
    } else {
        record.price_range.as_str()
    };

    let mut lines = vec![
        ui::style_text(&record.title, ui::StyleType::Title),
        String::new(),
        format!("{} {}", ui::style_text("Price:", ui::StyleType::Label), price),
        format!(
            "{} {}",
            ui::style_text("Location:", ui::StyleType::Label),
            record.location
        ),
        format!(
            "{} {} / {}",
            ui::style_text("Type:", ui::StyleType::Label),
            record.property_type,
            record.status
        ),
    ];

    let mut specs = Vec::new();
    if let Some(beds) = record.beds {
        specs.push(format!("{beds} beds"));
    }
    if let Some(baths) = record.baths {
        specs.push(format!("{baths} baths"));
    }
    if let Some(sqft) = record.area_sqft() {
        specs.push(format!("{sqft} sqft"));
    }
    if !specs.is_empty() {
        lines.push(format!(
            "{} {}",
            ui::style_text("Size:", ui::StyleType::Label),
            specs.join(", ")
        ));
    }

    let features = record.feature_list();
    if !features.is_empty() {
        lines.push(ui::style_text("Features:", ui::StyleType::Label));
        lines.extend(features.iter().map(|f| format!("  - {f}")));
    }

    if !record.description.is_empty() {
        lines.push(String::new());
        lines.push(record.description.clone());
    }

    let media: Vec<&str> = record
        .image
        .iter()
        .chain(record.gallery.iter())
        .chain(record.brochure.iter())
        .map(String::as_str)
        .collect();
    if !media.is_empty() {
        lines.push(String::new());
        lines.extend(media.iter().map(|m| ui::style_text(m, ui::StyleType::Subtle)));
    }

    lines.join("\n")
}

pub async fn show_property(source: &CatalogSource, id: &str) -> Result<()> {
    let Some(record) = source.find_listing(id).await else {
        bail!("Property not found: {}", id);
    };
    println!("{}", render_details(&record));
    Ok(())
}

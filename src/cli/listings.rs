use super::ui;
use crate::core::config::AppConfig;
use crate::core::facets::FacetChange;
use crate::core::listing::ListingRecord;
use crate::core::source::CatalogSource;
use crate::core::view::{ListingSnapshot, ListingView, MountOutcome};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Facet values given on the command line. Absent values mean "All".
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub area: Option<String>,
    pub budget: Option<String>,
}

impl ListArgs {
    pub fn changes(&self) -> Result<Vec<FacetChange>> {
        [
            ("type", &self.property_type),
            ("status", &self.status),
            ("area", &self.area),
            ("price_band", &self.budget),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| FacetChange::parse(name, v)))
        .collect()
    }
}

pub fn listings_table(records: &[&ListingRecord]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Title"),
        ui::header_cell("Type"),
        ui::header_cell("Status"),
        ui::header_cell("Price"),
        ui::header_cell("Location"),
        ui::header_cell("Beds"),
        ui::header_cell("Baths"),
        ui::header_cell("Sqft"),
    ]);

    for record in records {
        let price = if record.price_range.trim().is_empty() {
            "Contact for Quote"
        } else {
            record.price_range.as_str()
        };
        table.add_row(vec![
            Cell::new(&record.id),
            Cell::new(&record.title),
            Cell::new(record.property_type.as_str()),
            ui::status_cell(record.status),
            Cell::new(price).set_alignment(CellAlignment::Right),
            Cell::new(&record.location),
            ui::format_optional_cell(record.beds, |b| b.to_string()),
            ui::format_optional_cell(record.baths, |b| b.to_string()),
            ui::format_optional_cell(record.area_sqft(), |s| s.to_string()),
        ]);
    }
    table.to_string()
}

/// Renders the listing page: fallback notice, then the table or the empty
/// state.
pub fn render_listings(snapshot: &ListingSnapshot<'_>, heading: &str) -> String {
    let mut output = format!("{}\n\n", ui::style_text(heading, ui::StyleType::Title));

    if snapshot.is_fallback_source {
        output.push_str(&ui::style_text(
            "Note: showing sample data because the listing store is not available.",
            ui::StyleType::Notice,
        ));
        output.push_str("\n\n");
    }

    if snapshot.loading {
        output.push_str(&ui::style_text("Loading...", ui::StyleType::Subtle));
    } else if snapshot.records.is_empty() {
        output.push_str(&ui::style_text(
            "No matching properties found",
            ui::StyleType::Label,
        ));
        output.push('\n');
        output.push_str(&ui::style_text(
            "Try adjusting your filters or search criteria.",
            ui::StyleType::Subtle,
        ));
    } else {
        output.push_str(&listings_table(&snapshot.records));
        output.push_str(&format!(
            "\n{} properties",
            ui::style_text(&snapshot.records.len().to_string(), ui::StyleType::Label)
        ));
    }
    output
}

/// Mounts a listing view with the requested facets and prints it. Ctrl-C
/// while the catalog loads abandons the load.
pub async fn list_properties(config: &AppConfig, source: &CatalogSource, args: &ListArgs) -> Result<()> {
    let mut view = ListingView::new(config.facet_options());
    for change in args.changes()? {
        view.set_facet(change)?;
    }

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };
    let outcome = view.mount(source, &cancel).await;
    ctrl_c.abort();

    if outcome == MountOutcome::Cancelled {
        debug!("Listing load cancelled");
        println!("{}", ui::style_text("Cancelled.", ui::StyleType::Subtle));
        return Ok(());
    }

    println!("{}", render_listings(&view.snapshot(), "Project Collection"));
    Ok(())
}

pub async fn show_featured(source: &CatalogSource, limit: usize) -> Result<()> {
    let catalog = source.featured(limit).await;
    let snapshot = ListingSnapshot {
        records: catalog.records.iter().collect(),
        loading: false,
        is_fallback_source: catalog.is_fallback(),
    };
    println!("{}", render_listings(&snapshot, "Featured Projects"));
    Ok(())
}

use super::ui;
use crate::core::listing::{ListingStatus, PropertyType};
use crate::core::view::FacetOptions;
use comfy_table::Cell;

/// Renders the option lists of every exposed facet.
pub fn render_facet_options(options: &FacetOptions) -> String {
    let join = |items: Vec<&str>| items.join(", ");

    let mut lines = vec![format!(
        "{} All, {}",
        ui::style_text("Type:", ui::StyleType::Label),
        join(PropertyType::ALL.iter().map(|t| t.as_str()).collect())
    )];

    if options.layout.status {
        lines.push(format!(
            "{} All, {}",
            ui::style_text("Status:", ui::StyleType::Label),
            join(ListingStatus::ALL.iter().map(|s| s.as_str()).collect())
        ));
    }

    if options.layout.area {
        lines.push(format!(
            "{} All, {}",
            ui::style_text("Area:", ui::StyleType::Label),
            join(options.areas.iter().map(|a| a.name.as_str()).collect())
        ));
    }

    let mut output = lines.join("\n");

    if options.layout.price_band && !options.price_bands.is_empty() {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Budget"),
            ui::header_cell("From"),
            ui::header_cell("To"),
        ]);
        for band in &options.price_bands {
            table.add_row(vec![
                Cell::new(&band.label),
                Cell::new(ui::format_amount(band.min)),
                Cell::new(ui::format_amount(band.max)),
            ]);
        }
        output.push_str("\n\n");
        output.push_str(&table.to_string());
    }

    output
}

use crate::core::listing::ListingStatus;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Notice,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Notice => style(text).yellow(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "-".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("-")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

/// Creates a cell for a listing status, colored by availability.
pub fn status_cell(status: ListingStatus) -> Cell {
    let color = match status {
        ListingStatus::ForSale => Color::Green,
        ListingStatus::ForRent => Color::Cyan,
        ListingStatus::Constructing => Color::Yellow,
        ListingStatus::Sold => Color::Red,
    };
    Cell::new(status.as_str()).fg(color)
}

/// Formats whole currency units with lakh/crore words, e.g. `15000000` as
/// "1.5 Crore".
pub fn format_amount(value: u64) -> String {
    const CRORE: u64 = 10_000_000;
    const LAKH: u64 = 100_000;

    if value == u64::MAX {
        return "no limit".to_string();
    }
    let (scaled, unit) = if value >= CRORE {
        (value as f64 / CRORE as f64, " Crore")
    } else if value >= LAKH {
        (value as f64 / LAKH as f64, " Lac")
    } else {
        (value as f64, "")
    };
    let number = format!("{scaled:.2}");
    let number = number.trim_end_matches('0').trim_end_matches('.');
    format!("{number}{unit}")
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, with_message: bool) -> ProgressBar {
    let template = if with_message {
        "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    } else {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    };

    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(45_000), "45000");
        assert_eq!(format_amount(5_000_000), "50 Lac");
        assert_eq!(format_amount(9_500_000), "95 Lac");
        assert_eq!(format_amount(10_000_000), "1 Crore");
        assert_eq!(format_amount(15_000_000), "1.5 Crore");
        assert_eq!(format_amount(u64::MAX), "no limit");
    }
}

use super::ui;
use crate::core::activity::{Activity, ActivityCategory, filter_by_category, load_activities};
use crate::core::document::DocumentStore;
use anyhow::Result;
use comfy_table::Cell;
use std::sync::Arc;
use tracing::warn;

pub fn render_activities(activities: &[&Activity], category: ActivityCategory) -> String {
    let mut output = format!(
        "{}\n\n",
        ui::style_text(&format!("Our Activities: {category}"), ui::StyleType::Title)
    );

    if activities.is_empty() {
        output.push_str(&ui::style_text(
            "No activities posted yet in this category",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Title"),
        ui::header_cell("Description"),
        ui::header_cell("Image"),
    ]);
    for activity in activities {
        table.add_row(vec![
            activity
                .created_at
                .map_or(Cell::new("-"), |d| Cell::new(d.format("%Y-%m-%d"))),
            Cell::new(&activity.title),
            Cell::new(&activity.description),
            Cell::new(activity.image_url.as_deref().unwrap_or("-")),
        ]);
    }
    output.push_str(&table.to_string());
    output
}

/// Prints the posts of one category. A missing or failing store shows the
/// empty state.
pub async fn show_activities(
    store: Option<&Arc<dyn DocumentStore>>,
    collection: &str,
    category: ActivityCategory,
) -> Result<()> {
    let activities = match store {
        Some(store) => load_activities(store.as_ref(), collection)
            .await
            .unwrap_or_else(|e| {
                warn!("{:#}", e);
                Vec::new()
            }),
        None => Vec::new(),
    };
    let filtered = filter_by_category(&activities, category);
    println!("{}", render_activities(&filtered, category));
    Ok(())
}

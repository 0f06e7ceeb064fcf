use super::ui;
use crate::core::document::DocumentStore;
use crate::core::lead::{StoredLead, list_leads};
use crate::core::listing::ListingRecord;
use crate::core::projects::{ListingPatch, ProjectEditor};
use crate::core::source::{CatalogOrigin, CatalogSource, FallbackReason};
use anyhow::{Result, bail};
use comfy_table::Cell;
use tracing::info;

pub async fn add_listing(editor: &ProjectEditor, record: &ListingRecord) -> Result<()> {
    let id = editor.add(record).await?;
    println!("Added listing {} ({})", ui::style_text(&id, ui::StyleType::Label), record.title);
    Ok(())
}

pub async fn update_listing(editor: &ProjectEditor, id: &str, patch: &ListingPatch) -> Result<()> {
    editor.update(id, patch).await?;
    println!("Updated listing {}", ui::style_text(id, ui::StyleType::Label));
    Ok(())
}

pub async fn delete_listing(editor: &ProjectEditor, id: &str) -> Result<()> {
    editor.delete(id).await?;
    println!("Deleted listing {}", ui::style_text(id, ui::StyleType::Label));
    Ok(())
}

pub async fn toggle_sold(editor: &ProjectEditor, id: &str) -> Result<()> {
    let status = editor.toggle_sold(id).await?;
    println!(
        "Listing {} is now {}",
        ui::style_text(id, ui::StyleType::Label),
        status
    );
    Ok(())
}

fn format_timestamp(timestamp: Option<&str>) -> String {
    timestamp
        .map(|ts| match chrono::DateTime::parse_from_rfc3339(ts) {
            Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            Err(_) => ts.to_string(),
        })
        .unwrap_or_else(|| "-".to_string())
}

pub fn leads_table(leads: &[StoredLead]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Name"),
        ui::header_cell("Email"),
        ui::header_cell("Phone"),
        ui::header_cell("Message"),
    ]);
    for stored in leads {
        table.add_row(vec![
            Cell::new(format_timestamp(stored.timestamp.as_deref())),
            Cell::new(&stored.lead.name),
            Cell::new(&stored.lead.email),
            Cell::new(stored.lead.phone.as_deref().unwrap_or("-")),
            Cell::new(&stored.lead.message),
        ]);
    }
    table.to_string()
}

pub async fn show_leads(store: &dyn DocumentStore, collection: &str) -> Result<()> {
    let leads = list_leads(store, collection).await?;
    if leads.is_empty() {
        println!("{}", ui::style_text("No inquiries yet.", ui::StyleType::Subtle));
        return Ok(());
    }
    println!("{}", leads_table(&leads));
    Ok(())
}

/// Copies the seed catalog into an empty listings collection.
pub async fn seed_listings(source: &CatalogSource, editor: &ProjectEditor) -> Result<()> {
    let catalog = source.load_catalog().await;
    match catalog.origin {
        CatalogOrigin::Fallback(FallbackReason::Empty) => {}
        CatalogOrigin::Remote => bail!(
            "Listings collection already has {} listings, refusing to seed",
            catalog.records.len()
        ),
        CatalogOrigin::Fallback(reason) => bail!("Cannot seed listings: {}", reason),
    }

    let records = source.seed();
    let pb = ui::new_progress_bar(records.len() as u64, true);
    pb.set_message("Seeding listings");
    let result = editor.seed(records, &|| pb.inc(1)).await;
    pb.finish_and_clear();

    let ids = result?;
    info!("Seeded {} listings", ids.len());
    println!("Seeded {} listings", ids.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lead::Lead;
    use crate::store::memory::MemoryDocumentStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_seed_listings_only_into_empty_collection() {
        let store = Arc::new(MemoryDocumentStore::new());
        let source = CatalogSource::new(Some(store.clone()), "projects");
        let editor = ProjectEditor::new(store.clone(), "projects");

        seed_listings(&source, &editor).await.unwrap();
        let catalog = source.load_catalog().await;
        assert_eq!(catalog.origin, CatalogOrigin::Remote);
        assert_eq!(catalog.records.len(), 6);

        let err = seed_listings(&source, &editor).await.unwrap_err();
        assert!(err.to_string().contains("already has 6 listings"));
    }

    #[tokio::test]
    async fn test_seed_listings_refuses_without_store() {
        let store = Arc::new(MemoryDocumentStore::new());
        let source = CatalogSource::new(None, "projects");
        let editor = ProjectEditor::new(store, "projects");

        let err = seed_listings(&source, &editor).await.unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn test_leads_table() {
        let leads = vec![StoredLead {
            id: "a".to_string(),
            lead: Lead {
                name: "Karim".to_string(),
                email: "karim@example.com".to_string(),
                phone: None,
                message: "Call me".to_string(),
            },
            timestamp: Some("2026-03-01T10:30:00+00:00".to_string()),
        }];
        let output = leads_table(&leads);
        assert!(output.contains("2026-03-01 10:30"));
        assert!(output.contains("Karim"));
    }
}

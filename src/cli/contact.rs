use super::ui;
use crate::core::config::AppConfig;
use crate::core::document::DocumentStore;
use crate::core::lead::{Lead, submit_lead};
use anyhow::{Result, bail};
use std::sync::Arc;
use tracing::info;

/// Sends a contact request. Without a store there is nowhere to keep it, so
/// the visitor is pointed at the phone line instead.
pub async fn send_contact_request(
    config: &AppConfig,
    store: Option<&Arc<dyn DocumentStore>>,
    lead: &Lead,
) -> Result<()> {
    let Some(store) = store else {
        bail!(
            "Contact requests are unavailable in demo mode. Please call {}",
            config.site.phone
        );
    };

    let id = submit_lead(store.as_ref(), &config.collections.leads, lead).await?;
    info!("Lead {} submitted", id);
    println!(
        "{}",
        ui::style_text(
            "Thank you! Our team will contact you shortly.",
            ui::StyleType::Label
        )
    );
    Ok(())
}

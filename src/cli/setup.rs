use super::ui;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::path::Path;

/// Writes the example configuration to the platform config directory.
pub fn setup() -> Result<()> {
    setup_at_path(AppConfig::default_config_path()?)
}

pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    AppConfig::write_example(path)?;

    tracing::info!("Created default configuration at {}", path.display());
    println!(
        "{} {}",
        ui::style_text("Configuration written to", ui::StyleType::Label),
        path.display()
    );
    println!(
        "{}",
        ui::style_text(
            "Add a `store` section to serve listings from your own store.",
            ui::StyleType::Subtle
        )
    );
    Ok(())
}

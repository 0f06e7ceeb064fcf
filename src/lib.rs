pub mod cli;
pub mod core;
pub mod store;

use crate::cli::listings::ListArgs;
use crate::core::activity::ActivityCategory;
use crate::core::config::AppConfig;
use crate::core::lead::Lead;
use crate::core::listing::ListingRecord;
use crate::core::projects::{ListingPatch, ProjectEditor};
use crate::core::source::CatalogSource;
use anyhow::{Context, Result};
use tracing::{debug, info};

#[derive(Debug)]
pub enum AppCommand {
    List(ListArgs),
    Featured { limit: usize },
    Show { id: String },
    Facets,
    Activities { category: ActivityCategory },
    Contact(Lead),
    Admin(AdminCommand),
}

#[derive(Debug)]
pub enum AdminCommand {
    Add(Box<ListingRecord>),
    Update { id: String, patch: ListingPatch },
    Delete { id: String },
    ToggleSold { id: String },
    Leads,
    Seed,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("homelist starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = store::open_store(&config)?;
    let source = CatalogSource::new(store.clone(), &config.collections.listings);

    match command {
        AppCommand::List(args) => cli::listings::list_properties(&config, &source, &args).await,
        AppCommand::Featured { limit } => cli::listings::show_featured(&source, limit).await,
        AppCommand::Show { id } => cli::details::show_property(&source, &id).await,
        AppCommand::Facets => {
            println!(
                "{}",
                cli::options::render_facet_options(&config.facet_options())
            );
            Ok(())
        }
        AppCommand::Activities { category } => {
            cli::activities::show_activities(
                store.as_ref(),
                &config.collections.activities,
                category,
            )
            .await
        }
        AppCommand::Contact(lead) => {
            cli::contact::send_contact_request(&config, store.as_ref(), &lead).await
        }
        AppCommand::Admin(admin) => {
            let store = store.context(
                "Admin commands need a configured listing store. Add a `store` section to the config file",
            )?;
            let editor = ProjectEditor::new(store.clone(), &config.collections.listings);
            match admin {
                AdminCommand::Add(record) => cli::admin::add_listing(&editor, &record).await,
                AdminCommand::Update { id, patch } => {
                    cli::admin::update_listing(&editor, &id, &patch).await
                }
                AdminCommand::Delete { id } => cli::admin::delete_listing(&editor, &id).await,
                AdminCommand::ToggleSold { id } => cli::admin::toggle_sold(&editor, &id).await,
                AdminCommand::Leads => {
                    cli::admin::show_leads(store.as_ref(), &config.collections.leads).await
                }
                AdminCommand::Seed => cli::admin::seed_listings(&source, &editor).await,
            }
        }
    }
}

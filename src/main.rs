use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use homelist::cli::listings::ListArgs;
use homelist::core::activity::ActivityCategory;
use homelist::core::lead::Lead;
use homelist::core::listing::{ListingRecord, ListingStatus, PropertyType};
use homelist::core::log::init_logging;
use homelist::core::projects::ListingPatch;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Browse listings, narrowed by facets
    List {
        /// Property type: Residential, Commercial or Land
        #[arg(short = 't', long = "type")]
        property_type: Option<String>,
        /// Listing status, e.g. "For Sale"
        #[arg(short, long)]
        status: Option<String>,
        /// Area name, matched case-sensitively within the location
        #[arg(short, long)]
        area: Option<String>,
        /// Budget band label, e.g. "1 Crore - 2 Crore"
        #[arg(short, long)]
        budget: Option<String>,
    },
    /// Display the latest listings
    Featured {
        #[arg(short = 'n', long, default_value_t = 3)]
        limit: usize,
    },
    /// Display one listing in full
    Show { id: String },
    /// Display the available facet values
    Facets,
    /// Display activity posts
    Activities {
        /// Gallery or Blog
        #[arg(long, default_value = "Gallery")]
        category: ActivityCategory,
    },
    /// Send a contact request
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        message: String,
    },
    /// Manage listings and leads in the configured store
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Add a listing
    Add(AddArgs),
    /// Change fields of a listing
    Update {
        id: String,
        #[command(flatten)]
        fields: UpdateArgs,
    },
    /// Delete a listing
    Delete { id: String },
    /// Flip a listing between Sold and For Sale
    ToggleSold { id: String },
    /// Display contact requests, newest first
    Leads,
    /// Copy the sample catalog into an empty store
    Seed,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    price: String,
    #[arg(long)]
    location: String,
    #[arg(long = "type", default_value = "Residential")]
    property_type: PropertyType,
    #[arg(long, default_value = "For Sale")]
    status: ListingStatus,
    #[arg(long)]
    beds: Option<u32>,
    #[arg(long)]
    baths: Option<u32>,
    #[arg(long, default_value_t = 0)]
    sqft: u32,
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    brochure: Option<String>,
    /// Comma-separated list of features
    #[arg(long)]
    features: Option<String>,
    #[arg(long, default_value = "")]
    description: String,
}

#[derive(Args)]
struct UpdateArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long = "type")]
    property_type: Option<PropertyType>,
    #[arg(long)]
    status: Option<ListingStatus>,
    #[arg(long, conflicts_with = "clear_beds")]
    beds: Option<u32>,
    /// Remove the bedroom count
    #[arg(long)]
    clear_beds: bool,
    #[arg(long, conflicts_with = "clear_baths")]
    baths: Option<u32>,
    /// Remove the bathroom count
    #[arg(long)]
    clear_baths: bool,
    #[arg(long)]
    sqft: Option<u32>,
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    brochure: Option<String>,
    #[arg(long)]
    features: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl From<AddArgs> for ListingRecord {
    fn from(args: AddArgs) -> ListingRecord {
        ListingRecord {
            id: String::new(),
            title: args.title,
            price_range: args.price,
            location: args.location,
            property_type: args.property_type,
            status: args.status,
            beds: args.beds,
            baths: args.baths,
            sqft: args.sqft,
            image: args.image,
            gallery: Vec::new(),
            brochure: args.brochure,
            features: args.features,
            description: args.description,
        }
    }
}

fn count_change(value: Option<u32>, clear: bool) -> Option<Option<u32>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

impl From<UpdateArgs> for ListingPatch {
    fn from(args: UpdateArgs) -> ListingPatch {
        ListingPatch {
            title: args.title,
            price_range: args.price,
            location: args.location,
            property_type: args.property_type,
            status: args.status,
            beds: count_change(args.beds, args.clear_beds),
            baths: count_change(args.baths, args.clear_baths),
            sqft: args.sqft,
            image: args.image,
            brochure: args.brochure,
            features: args.features,
            description: args.description,
        }
    }
}

impl From<AdminCommands> for homelist::AdminCommand {
    fn from(cmd: AdminCommands) -> homelist::AdminCommand {
        match cmd {
            AdminCommands::Add(args) => homelist::AdminCommand::Add(Box::new(args.into())),
            AdminCommands::Update { id, fields } => homelist::AdminCommand::Update {
                id,
                patch: fields.into(),
            },
            AdminCommands::Delete { id } => homelist::AdminCommand::Delete { id },
            AdminCommands::ToggleSold { id } => homelist::AdminCommand::ToggleSold { id },
            AdminCommands::Leads => homelist::AdminCommand::Leads,
            AdminCommands::Seed => homelist::AdminCommand::Seed,
        }
    }
}

impl From<Commands> for homelist::AppCommand {
    fn from(cmd: Commands) -> homelist::AppCommand {
        match cmd {
            Commands::List {
                property_type,
                status,
                area,
                budget,
            } => homelist::AppCommand::List(ListArgs {
                property_type,
                status,
                area,
                budget,
            }),
            Commands::Featured { limit } => homelist::AppCommand::Featured { limit },
            Commands::Show { id } => homelist::AppCommand::Show { id },
            Commands::Facets => homelist::AppCommand::Facets,
            Commands::Activities { category } => homelist::AppCommand::Activities { category },
            Commands::Contact {
                name,
                email,
                phone,
                message,
            } => homelist::AppCommand::Contact(Lead {
                name,
                email,
                phone,
                message,
            }),
            Commands::Admin(admin) => homelist::AppCommand::Admin(admin.into()),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => homelist::cli::setup::setup(),
        Some(cmd) => homelist::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

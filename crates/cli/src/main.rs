//! StoreMap CLI - Database migrations and data management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (creates PostGIS extension and tables)
//! storemap-cli migrate
//!
//! # Import district boundaries from a GeoJSON FeatureCollection
//! storemap-cli import districts -f base_map.geojson --name-property NAME_2
//!
//! # Import stores from a JSON array
//! storemap-cli import stores -f stores.json
//!
//! # Create a user for the admin client
//! storemap-cli user create -u admin -p s3cret -r admin
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `import districts` / `import stores` - Offline data import
//! - `user create` - Create users with hashed credentials

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "storemap-cli")]
#[command(author, version, about = "StoreMap CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Import offline data
    Import {
        #[command(subcommand)]
        target: ImportTarget,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum ImportTarget {
    /// Import district boundaries from a GeoJSON FeatureCollection
    Districts {
        /// Path to the GeoJSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Feature property holding the district name
        #[arg(long, default_value = "name")]
        name_property: String,
    },
    /// Import stores from a JSON array
    Stores {
        /// Path to the JSON file
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password (hashed before storage)
        #[arg(short, long)]
        password: String,

        /// User role (`admin`, `standard`)
        #[arg(short, long, default_value = "standard")]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Import { target } => match target {
            ImportTarget::Districts {
                file,
                name_property,
            } => commands::import::districts(&file, &name_property).await?,
            ImportTarget::Stores { file } => commands::import::stores(&file).await?,
        },
        Commands::User { action } => match action {
            UserAction::Create {
                username,
                password,
                role,
            } => commands::user::create(&username, &password, &role).await?,
        },
    }
    Ok(())
}

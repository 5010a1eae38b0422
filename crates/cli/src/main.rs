//! Azlok CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run frontend database migrations
//! azlok-cli migrate
//!
//! # Create a seller dashboard account
//! azlok-cli seller create -e ops@azlok.com -n "Ops Team" -p 'a-strong-password'
//!
//! # Seed the database with a demo seller
//! azlok-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run frontend database migrations
//! - `seller create` - Create seller dashboard accounts
//! - `seed` - Seed the database with demo data for local development

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "azlok-cli")]
#[command(author, version, about = "Azlok CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run frontend database migrations
    Migrate,
    /// Manage seller dashboard accounts
    Seller {
        #[command(subcommand)]
        action: SellerAction,
    },
    /// Seed the database with demo data
    Seed,
}

#[derive(Subcommand)]
enum SellerAction {
    /// Create a new seller account
    Create {
        /// Seller email address
        #[arg(short, long)]
        email: String,

        /// Seller display name
        #[arg(short, long)]
        name: String,

        /// Initial password
        #[arg(short, long)]
        password: String,
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
        Commands::Seller { action } => match action {
            SellerAction::Create {
                email,
                name,
                password,
            } => {
                commands::seller::create(&email, &name, &password).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}

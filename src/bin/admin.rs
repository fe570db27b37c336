//! CLI administration tool for link-redirector.
//!
//! Talks to the mapping store directly, using the same environment
//! configuration as the server.
//!
//! # Usage
//!
//! ```bash
//! # Look up a code
//! cargo run --bin admin -- mapping get aB3dE5gH
//!
//! # Create a mapping
//! cargo run --bin admin -- mapping create https://example.com/page
//!
//! # Check the store connection
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! - `MAPPING_STORE_URL` (required): Store location
//! - `MAPPING_TABLE` (required): Table name or key namespace
//!
//! Mappings are create-only; there are no update or delete commands.

use link_redirector::config::{self, Config, mask_connection_string};
use link_redirector::infrastructure::persistence::{StoreBackend, connect_repository};
use link_redirector::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing link-redirector mappings.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect or create mappings
    Mapping {
        #[command(subcommand)]
        action: MappingAction,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Mapping subcommands.
#[derive(Subcommand)]
enum MappingAction {
    /// Print the target URL for a short code
    Get {
        /// Short code to look up
        code: String,
    },

    /// Create a mapping for a target URL
    Create {
        /// Target URL to shorten
        target_url: String,
    },
}

/// Store diagnostic subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    if StoreBackend::from_url(&config.store_url)? == StoreBackend::Memory {
        println!(
            "{}",
            "Warning: memory:// store lives only as long as this command".yellow()
        );
    }

    match cli.command {
        Commands::Mapping { action } => handle_mapping_action(action, &config).await?,
        Commands::Store { action } => handle_store_action(action, &config).await?,
    }

    Ok(())
}

async fn connect_state(config: &Config) -> Result<AppState> {
    let repository = connect_repository(
        &config.store_url,
        &config.store_name,
        config.store_timeout(),
    )
    .await
    .context("Failed to connect to mapping store")?;

    Ok(AppState::from_config(config, repository))
}

/// Dispatches mapping commands.
async fn handle_mapping_action(action: MappingAction, config: &Config) -> Result<()> {
    let state = connect_state(config).await?;

    match action {
        MappingAction::Get { code } => {
            let target = state
                .mapping_service
                .resolve(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Lookup failed: {}", e))?;

            match target {
                Some(target_url) => {
                    println!("  Code:   {}", code.cyan());
                    println!("  Target: {}", target_url.bright_white());
                }
                None => {
                    println!("{} {}", "No redirect found for".yellow(), code.cyan());
                }
            }
        }
        MappingAction::Create { target_url } => {
            let mapping = state
                .mapping_service
                .create_mapping(&target_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create mapping: {}", e))?;

            println!("{}", "Mapping created".green().bold());
            println!("  Code:   {}", mapping.code.bright_yellow().bold());
            println!("  Target: {}", mapping.target_url.bright_white());
        }
    }

    Ok(())
}

/// Handles store diagnostic commands.
async fn handle_store_action(action: StoreAction, config: &Config) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!(
                "{} {}",
                "Checking store".bright_blue(),
                mask_connection_string(&config.store_url).bright_black()
            );

            let state = connect_state(config).await?;

            if state.mapping_service.health_check().await {
                println!("{}", "Store connection OK".green().bold());
            } else {
                anyhow::bail!("Store health check failed");
            }
        }
    }

    Ok(())
}

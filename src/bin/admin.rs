//! CLI administration tool for parcel-depot.
//!
//! Manages API tokens, backups and storage without going through the HTTP API.
//! Uses the same environment configuration as the server.
//!
//! # Usage
//!
//! ```bash
//! # Create a new API token
//! cargo run --bin depot-admin -- token create --name "Front desk"
//!
//! # List all tokens
//! cargo run --bin depot-admin -- token list
//!
//! # Revoke a token
//! cargo run --bin depot-admin -- token revoke "Front desk"
//!
//! # Write a backup file / restore one
//! cargo run --bin depot-admin -- backup export --output ./backups
//! cargo run --bin depot-admin -- backup import ./backups/warehouse_backup_2024-05-01.json
//!
//! # Warehouse overview
//! cargo run --bin depot-admin -- stats
//!
//! # Check the storage backend
//! cargo run --bin depot-admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! - `TOKEN_SIGNING_SECRET` (required): must match the server's
//! - `STORAGE_BACKEND`, `DATA_DIR`, `REDIS_URL`: storage selection, see [`parcel_depot::config`]

use parcel_depot::config::Config;
use parcel_depot::domain::entities::BackupSnapshot;
use parcel_depot::server::open_store;
use parcel_depot::state::{AppState, TrackingOptions};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::path::PathBuf;

/// CLI tool for managing parcel-depot.
#[derive(Parser)]
#[command(name = "depot-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Export or restore warehouse data
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },

    /// Delete all warehouse data (tokens are kept)
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show warehouse overview
    Stats,

    /// Storage operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Token name (e.g., "Front desk", "Scanner")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

/// Backup subcommands.
#[derive(Subcommand)]
enum BackupAction {
    /// Write a dated JSON snapshot
    Export {
        /// Target directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore the sections contained in a snapshot file
    Import {
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Storage subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check that the backend is reachable
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let store = open_store(&config).await?;
    let state = AppState::new(
        store,
        config.token_signing_secret.clone(),
        TrackingOptions::default(),
    );

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &state).await?,
        Commands::Backup { action } => handle_backup_action(action, &state).await?,
        Commands::Clear { yes } => clear_data(&state, yes).await?,
        Commands::Stats => handle_stats(&state).await?,
        Commands::Store { action } => handle_store_action(action, &state).await?,
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, state: &AppState) -> Result<()> {
    match action {
        TokenAction::Create { name, token, yes } => create_token(state, name, token, yes).await,
        TokenAction::List => list_tokens(state).await,
        TokenAction::Revoke { name_or_id } => revoke_token(state, name_or_id).await,
    }
}

/// Creates a new API token with interactive prompts.
///
/// Only the HMAC of the token is stored, keyed with `TOKEN_SIGNING_SECRET`;
/// the raw value is printed once.
async fn create_token(
    state: &AppState,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create API Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Front desk")
            .interact_text()?,
    };

    if token.is_some() {
        println!("{}", "Using provided token value".yellow());
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create token \"{}\"?", token_name))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let (record, raw) = state
        .auth_service
        .issue(&token_name, token)
        .await
        .context("Failed to create token")?;

    println!();
    println!("{}", "Token created successfully!".green().bold());
    println!("  ID:    {}", record.id.bright_black());
    println!("  Name:  {}", record.name.cyan());
    println!("  Token: {}", raw.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/dashboard",
        raw.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
async fn list_tokens(state: &AppState) -> Result<()> {
    println!("{}", "API Tokens".bright_blue().bold());
    println!();

    let tokens = state
        .auth_service
        .list()
        .await
        .context("Failed to list tokens")?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} depot-admin -- token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<20} {:<30} {:<18} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "-".repeat(100).bright_black());

    for token in &tokens {
        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<20} {:<30} {:<18} {:<18} {}",
            token.id.bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID after confirmation.
async fn revoke_token(state: &AppState, name_or_id: String) -> Result<()> {
    println!("{}", "Revoke API Token".bright_blue().bold());
    println!();

    let token = state
        .auth_service
        .find(&name_or_id)
        .await
        .context("Failed to look up token")?
        .context("Token not found")?;

    if token.is_revoked() {
        println!("{}", "This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    state
        .auth_service
        .revoke(&token.id)
        .await
        .context("Failed to revoke token")?;

    println!();
    println!("{}", "Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Dispatches backup commands.
async fn handle_backup_action(action: BackupAction, state: &AppState) -> Result<()> {
    match action {
        BackupAction::Export { output } => {
            let export = state.backup_service.export().await?;
            let dir = output.unwrap_or_else(|| PathBuf::from("."));
            tokio::fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;

            let path = dir.join(&export.filename);
            let body = serde_json::to_vec_pretty(&export.snapshot)?;
            tokio::fs::write(&path, body)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;

            println!(
                "{} {}",
                "Backup written to".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        BackupAction::Import { file, yes } => {
            let raw = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let snapshot: BackupSnapshot =
                serde_json::from_slice(&raw).context("File is not a valid backup")?;

            println!("{}", "Restore Backup".bright_blue().bold());
            println!("  Sections: {}", snapshot.sections().join(", ").cyan());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Overwrite these sections?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("{}", "Cancelled".red());
                    return Ok(());
                }
            }

            let restored = state.backup_service.import(snapshot).await?;
            println!(
                "{} {}",
                "Restored:".green().bold(),
                restored.join(", ").bright_white()
            );
        }
    }

    Ok(())
}

/// Deletes every warehouse collection after confirmation.
async fn clear_data(state: &AppState, skip_confirm: bool) -> Result<()> {
    println!("{}", "Clear Warehouse Data".bright_red().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete ALL packages, shipments, shelves and presets?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    state.backup_service.clear(true).await?;
    println!("{}", "All warehouse data deleted".green().bold());
    Ok(())
}

/// Displays the warehouse overview.
async fn handle_stats(state: &AppState) -> Result<()> {
    println!("{}", "Warehouse Overview".bright_blue().bold());
    println!();

    let summary = state.dashboard_service.summary().await;
    let active_tokens = state
        .auth_service
        .list()
        .await?
        .iter()
        .filter(|t| !t.is_revoked())
        .count();

    let rows = [
        ("Packages", summary.total_packages),
        ("In stock", summary.in_stock),
        ("Out for delivery", summary.out_for_delivery),
        ("Delivered", summary.delivered),
        ("Shipments", summary.total_shipments),
        ("Pending shipments", summary.pending_shipments),
        ("Active tokens", active_tokens),
    ];
    for (label, value) in rows {
        println!(
            "  {:<18} {}",
            format!("{}:", label),
            value.to_string().bright_green().bold()
        );
    }

    if !summary.shelf_alerts.is_empty() {
        println!();
        println!("{}", "  Shelves nearly full:".yellow().bold());
        for shelf in &summary.shelf_alerts {
            println!(
                "    {:<12} {}/{}",
                shelf.name.cyan(),
                shelf.current_count,
                shelf.capacity
            );
        }
    }
    println!();

    Ok(())
}

/// Handles storage diagnostic commands.
async fn handle_store_action(action: StoreAction, state: &AppState) -> Result<()> {
    match action {
        StoreAction::Check => {
            let backend = state.store.backend();
            println!(
                "{}",
                format!("Checking {} storage...", backend).bright_blue()
            );

            if !state.store.health_check().await {
                anyhow::bail!("{} storage is not reachable", backend);
            }

            println!("{}", "Storage OK".green().bold());
        }
    }

    Ok(())
}

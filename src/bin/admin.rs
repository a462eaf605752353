//! CLI administration tool for tinylink.
//!
//! Inspects and manages links directly in the database, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links, newest first
//! cargo run --bin admin -- links list
//!
//! # Show a single link
//! cargo run --bin admin -- links show Ab3xYz
//!
//! # Delete a link (asks for confirmation unless -y is given)
//! cargo run --bin admin -- links delete Ab3xYz
//!
//! # View totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use tinylink::application::services::LinkService;
use tinylink::config::{Config, mask_connection_string};
use tinylink::domain::entities::Link;
use tinylink::domain::repositories::LinkRepository;
use tinylink::error::AppError;
use tinylink::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylink.
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
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show link and click totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show a single link
    Show {
        /// Short code
        code: String,
    },

    /// Permanently delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;

    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    match cli.command {
        Commands::Links { action } => handle_link_action(action, repo).await?,
        Commands::Stats => handle_stats(repo).await?,
        Commands::Db { action } => handle_db_action(action, repo).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, repo: Arc<PgLinkRepository>) -> Result<()> {
    let service = LinkService::new(repo);

    match action {
        LinkAction::List => list_links(&service).await,
        LinkAction::Show { code } => show_link(&service, &code).await,
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await,
    }
}

/// Lists all links in a table.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code      Clicks   Created           Target
///   ──────────────────────────────────────────────────────────────────
///   Ab3xYz    12       2025-01-15 10:30  https://example.com/docs
/// ```
async fn list_links(service: &LinkService) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<9} {:<8} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<9} {:<8} {:<17} {}",
            link.code.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn show_link(service: &LinkService, code: &str) -> Result<()> {
    let link = find_link(service, code).await?;

    print_link(&link);
    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &LinkService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = find_link(service, code).await?;
    print_link(&link);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

async fn find_link(service: &LinkService, code: &str) -> Result<Link> {
    match service.get_link(code).await {
        Ok(link) => Ok(link),
        Err(AppError::NotFound { .. }) => anyhow::bail!("Link '{}' not found", code),
        Err(e) => Err(anyhow::anyhow!("Database error: {}", e)),
    }
}

fn print_link(link: &Link) {
    let last_clicked = link
        .last_clicked
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Never".to_string());

    println!("  Code:         {}", link.code.cyan().bold());
    println!("  Target:       {}", link.target_url);
    println!("  Clicks:       {}", link.clicks.to_string().bright_green());
    println!(
        "  Created:      {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Last clicked: {}", last_clicked.bright_black());
    println!();
}

/// Displays link and click totals.
async fn handle_stats(repo: Arc<PgLinkRepository>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let totals = repo
        .totals()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load totals: {}", e))?;

    println!(
        "  Links:  {}",
        totals.links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        totals.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, repo: Arc<PgLinkRepository>) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

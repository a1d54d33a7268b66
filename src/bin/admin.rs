//! CLI administration tool for geo-locator.
//!
//! Inspects and manages the cached geolocation records directly in the
//! database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show a stored record
//! cargo run --bin geo-admin -- show 142.251.98.139
//!
//! # List stored records
//! cargo run --bin geo-admin -- list --page 1 --page-size 20
//!
//! # Fetch from ipstack and store (IP or hostname)
//! cargo run --bin geo-admin -- fetch google.com
//!
//! # Delete a stored record
//! cargo run --bin geo-admin -- delete 142.251.98.139
//!
//! # Check database connection
//! cargo run --bin geo-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (optional): SQLite database, same default as the server
//! - `IPSTACK_ACCESS_KEY` (required for `fetch`)

use geo_locator::application::services::GeoService;
use geo_locator::config;
use geo_locator::domain::identifier::RequestIdentifier;
use geo_locator::domain::repositories::LocationRepository;
use geo_locator::error::AppError;
use geo_locator::infrastructure::persistence::{self, MIGRATOR, SqliteLocationRepository};
use geo_locator::infrastructure::provider::IpstackProvider;
use geo_locator::infrastructure::resolver::DnsResolver;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://geolocation.db?mode=rwc";

/// CLI tool for managing cached geolocation records.
#[derive(Parser)]
#[command(name = "geo-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Show the record stored for an IP
    Show {
        /// Canonical IP address
        ip: String,
    },

    /// List stored records, newest first
    List {
        #[arg(short, long, default_value_t = 1)]
        page: i64,

        #[arg(short = 's', long, default_value_t = 20)]
        page_size: i64,
    },

    /// Look up an IP or hostname at the provider and store the result
    Fetch {
        /// IP address or hostname
        target: String,
    },

    /// Delete the record stored for an IP
    Delete {
        /// Canonical IP address
        ip: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let pool = persistence::connect_pool(&database_url, 1, Duration::from_secs(30))
        .await
        .context("Failed to connect to database")?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    let pool = Arc::new(pool);
    let repo = Arc::new(SqliteLocationRepository::new(pool.clone()));

    match cli.command {
        Commands::Show { ip } => show_location(repo, ip).await?,
        Commands::List { page, page_size } => list_locations(repo, page, page_size).await?,
        Commands::Fetch { target } => fetch_location(repo, target).await?,
        Commands::Delete { ip, yes } => delete_location(repo, ip, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool, repo).await?,
    }

    Ok(())
}

/// Prints the stored provider record for an IP as pretty JSON.
async fn show_location(repo: Arc<SqliteLocationRepository>, ip: String) -> Result<()> {
    let ip = canonical_ip(&ip)?;
    let location = repo
        .find_by_ip(&ip)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(location) = location else {
        println!("{}", format!("No record stored for {ip}").yellow());
        return Ok(());
    };

    println!("{}", "Stored location".bright_blue().bold());
    println!();
    println!("  IP:      {}", location.ip.cyan());
    println!(
        "  Stored:  {}",
        location
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();
    println!("{}", serde_json::to_string_pretty(&location.provider_response)?);

    Ok(())
}

/// Lists stored records in a table.
///
/// # Output Format
///
/// ```text
///   ID    IP                                        Country  City                 Stored
///   ────────────────────────────────────────────────────────────────────────────────────────
///   1     142.251.98.139                            US       Mountain View        2025-06-01 10:30
/// ```
async fn list_locations(
    repo: Arc<SqliteLocationRepository>,
    page: i64,
    page_size: i64,
) -> Result<()> {
    if page < 1 || page_size < 1 {
        anyhow::bail!("--page and --page-size must be at least 1");
    }

    println!("{}", "Stored locations".bright_blue().bold());
    println!();

    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count locations: {}", e))?;
    let locations = repo
        .list(page, page_size)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list locations: {}", e))?;

    if locations.is_empty() {
        println!("{}", "  No locations found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<41} {:<8} {:<20} {}",
        "ID".bright_white().bold(),
        "IP".bright_white().bold(),
        "Country".bright_white().bold(),
        "City".bright_white().bold(),
        "Stored".bright_white().bold()
    );
    println!("  {}", "─".repeat(92).bright_black());

    for location in &locations {
        let field = |name: &str| {
            location
                .provider_response
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or("-")
                .to_string()
        };

        println!(
            "  {:<5} {:<41} {:<8} {:<20} {}",
            location.id.to_string().bright_black(),
            location.ip.cyan(),
            field("country_code"),
            field("city"),
            location
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Page {} ({} per page), total: {}",
        page,
        page_size,
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Runs the same create workflow as `POST /geo`.
async fn fetch_location(repo: Arc<SqliteLocationRepository>, target: String) -> Result<()> {
    let config = config::load_from_env()?;

    let provider = IpstackProvider::new(
        config.ipstack_base_url.clone(),
        config.ipstack_access_key.clone(),
        config.provider_timeout(),
    )
    .context("Failed to build provider client")?;

    let service = GeoService::new(
        repo,
        Arc::new(DnsResolver::new(config.resolver_timeout())),
        Arc::new(provider),
    );

    let identifier = target_identifier(&target)?;

    match service.create_location(&identifier).await {
        Ok(record) => {
            println!("{}", format!("Stored location for {target}").green().bold());
            println!();
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Err(AppError::AlreadyExists) => {
            println!("{}", format!("A record for {target} is already stored").yellow());
        }
        Err(e) => anyhow::bail!("Failed to fetch location: {}", e),
    }

    Ok(())
}

/// Deletes a record after confirmation (default: No).
async fn delete_location(
    repo: Arc<SqliteLocationRepository>,
    ip: String,
    skip_confirm: bool,
) -> Result<()> {
    let ip = canonical_ip(&ip)?;

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete the stored location for {ip}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete_by_ip(&ip)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete location: {}", e))?;

    if deleted {
        println!("{}", "Location deleted".green().bold());
    } else {
        println!("{}", format!("No record stored for {ip}").yellow());
    }

    Ok(())
}

/// Parses an IP argument into the canonical form records are stored under,
/// so `2001:0db8::0001` finds the record for `2001:db8::1`.
fn canonical_ip(raw: &str) -> Result<String> {
    match RequestIdentifier::from_parts(Some(raw), None)? {
        RequestIdentifier::Ip(ip) => Ok(ip.to_string()),
        RequestIdentifier::Hostname(host) => anyhow::bail!("Not an IP address: {host}"),
    }
}

/// IP literals go through the `ip` path, anything else is resolved as a host.
fn target_identifier(target: &str) -> Result<RequestIdentifier> {
    let identifier = if target.trim().parse::<IpAddr>().is_ok() {
        RequestIdentifier::from_parts(Some(target), None)?
    } else {
        RequestIdentifier::from_parts(None, Some(target))?
    };
    Ok(identifier)
}

/// Dispatches database commands.
async fn handle_db_action(
    action: DbAction,
    pool: &SqlitePool,
    repo: Arc<SqliteLocationRepository>,
) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query("SELECT 1")
                .execute(pool)
                .await
                .context("Database check failed")?;
            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;
            let count = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count locations: {}", e))?;

            println!("{}", "Database info".bright_blue().bold());
            println!();
            println!("  SQLite version:   {}", version.cyan());
            println!("  Stored locations: {}", count.to_string().bright_white().bold());
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_ip() {
        assert_eq!(canonical_ip("2001:0db8::0001").unwrap(), "2001:db8::1");
        assert_eq!(canonical_ip(" 142.251.98.139 ").unwrap(), "142.251.98.139");
        assert!(canonical_ip("google.com").is_err());
        assert!(canonical_ip("").is_err());
    }

    #[test]
    fn test_target_identifier() {
        assert_eq!(
            target_identifier("2001:0db8::0001").unwrap().to_string(),
            "2001:db8::1"
        );
        assert_eq!(
            target_identifier("google.com").unwrap(),
            RequestIdentifier::Hostname("google.com".to_string())
        );
    }
}

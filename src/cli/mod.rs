//! CLI module for Netlog
//!
//! Provides commands:
//! - `init`: create the log table in the configured database
//! - `add`: store records read from JSON
//! - `query`: filtered, paginated search
//! - `stats` / `clear`: inspect or empty the store

use clap::{Args, Parser, Subcommand};
use netlog_store::{HttpLogStore, StoreConfig};
use std::path::PathBuf;

pub mod data;
pub mod records;

/// Netlog HTTP log store CLI
#[derive(Parser, Debug)]
#[command(name = "netlog")]
#[command(about = "Inspect and maintain captured HTTP logs")]
#[command(version)]
pub struct Cli {
    /// Database file (overrides configuration)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the log table if it is missing
    Init,
    /// Add records from a JSON file (a record or an array; `-` reads stdin)
    Add {
        /// Input file
        file: PathBuf,
    },
    /// Search stored records
    Query(QueryArgs),
    /// Show record count and database size
    Stats,
    /// Delete all records
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Maximum records returned
    #[arg(long, default_value_t = 50)]
    pub limit: u32,
    /// Records to skip
    #[arg(long)]
    pub offset: Option<u32>,
    /// Lowest status code
    #[arg(long)]
    pub min_code: Option<u16>,
    /// Highest status code
    #[arg(long)]
    pub max_code: Option<u16>,
    /// Only failed exchanges (error message or 4xx/5xx)
    #[arg(long)]
    pub errors: bool,
    /// Case-sensitive text to look for in any field
    #[arg(long)]
    pub search: Option<String>,
}

/// Resolve store settings from configuration and the `--db` override
fn store_config(db: Option<PathBuf>) -> anyhow::Result<StoreConfig> {
    let mut config = crate::config::load_config()?.store;
    if db.is_some() {
        config.db_path = db;
    }
    Ok(config)
}

async fn open_store(config: &StoreConfig) -> anyhow::Result<HttpLogStore> {
    use anyhow::Context;
    HttpLogStore::open(config).await.with_context(|| {
        format!(
            "Failed to open log store at {}",
            config.resolved_db_path().display()
        )
    })
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    };

    let config = store_config(cli.db)?;
    match command {
        Commands::Init => data::init(&config).await,
        Commands::Add { file } => records::add(&config, &file).await,
        Commands::Query(args) => records::query(&config, args).await,
        Commands::Stats => data::stats(&config).await,
        Commands::Clear { force } => data::clear(&config, force).await,
    }
}

//! Data management CLI commands
//!
//! `netlog init`   — create the log table
//! `netlog stats`  — show record count and file size
//! `netlog clear`  — delete all records

use super::open_store;
use anyhow::Result;
use netlog_store::StoreConfig;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;

// ── Helpers ──────────────────────────────────────────────────────────

/// Bytes on disk for the database, including an un-checkpointed WAL sidecar
fn database_size(db_path: &Path) -> Option<u64> {
    let main = std::fs::metadata(db_path).ok()?.len();
    let mut wal = db_path.as_os_str().to_owned();
    wal.push("-wal");
    let wal = std::fs::metadata(&wal).map(|m| m.len()).unwrap_or(0);
    Some(main + wal)
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Ask a yes/no question; anything but an explicit yes declines
fn confirm_with(prompt: &str, mut input: impl BufRead, mut out: impl Write) -> io::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

// ── Commands ─────────────────────────────────────────────────────────

pub async fn init(config: &StoreConfig) -> Result<()> {
    // open() creates the table when missing
    let _store = open_store(config).await?;
    println!("Log store ready at {}", config.resolved_db_path().display());
    Ok(())
}

pub async fn stats(config: &StoreConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let Some(size) = database_size(&db_path) else {
        println!("Records: 0 ({}: not found)", db_path.display());
        return Ok(());
    };

    let store = open_store(config).await?;
    let count = store.count().await?;
    println!(
        "Records: {:<12}({}: {})",
        count,
        db_path.display(),
        format_bytes(size),
    );
    Ok(())
}

pub async fn clear(config: &StoreConfig, force: bool) -> Result<()> {
    let store = open_store(config).await?;
    let count = store.count().await?;
    if count == 0 {
        println!("No records to delete.");
        return Ok(());
    }

    if !force {
        let prompt = format!(
            "Delete {count} HTTP log records from {}?",
            config.resolved_db_path().display()
        );
        if !confirm_with(&prompt, io::stdin().lock(), io::stdout())? {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.clear_all().await?;
    info!("Cleared {} records", count);
    println!("Deleted {count} records.");
    Ok(())
}

/// Binary entry point for the wellness tracker MCP server
///
/// Parses command line flags, wires up logging and hands control to the
/// JSON-RPC loop. Logs go to stderr only: stdout carries the MCP protocol
/// stream and must stay clean.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use wellness_tracker_mcp::TrackerServer;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQLite database file; a per-user default is picked when omitted
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        match (self.verbose, self.debug) {
            (true, _) => "debug",
            (false, true) => "info",
            (false, false) => "warn",
        }
    }
}

/// Pick a writable location for the database file
///
/// Candidate directories are tried in order: the user's home, the platform
/// data and config directories, then the working directory. The first one
/// that accepts a write probe wins; a temp directory is the last resort.
fn resolve_database_path() -> std::io::Result<PathBuf> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(".wellness_tracker")),
        dirs::data_dir().map(|p| p.join("wellness_tracker")),
        dirs::config_dir().map(|p| p.join("wellness_tracker")),
        std::env::current_dir().ok().map(|p| p.join(".wellness_tracker")),
    ];

    for dir in candidates.into_iter().flatten() {
        if dir_is_writable(&dir) {
            return Ok(dir.join("wellness.db"));
        }
    }

    let fallback = std::env::temp_dir().join("wellness_tracker");
    fs::create_dir_all(&fallback)?;
    tracing::warn!(
        "No user directory was writable, using {} for the database",
        fallback.display()
    );
    Ok(fallback.join("wellness.db"))
}

/// Create the directory if needed and probe it with a throwaway write
fn dir_is_writable(dir: &Path) -> bool {
    if fs::create_dir_all(dir).is_err() {
        return false;
    }

    let probe = dir.join(".write_check");
    let writable = fs::write(&probe, b"ok").is_ok();
    let _ = fs::remove_file(&probe);
    writable
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!("wellness_tracker_mcp={}", cli.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let db_path = match cli.database {
        Some(path) => {
            // An explicitly requested path gets its parent created, not probed
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            path
        }
        None => resolve_database_path()?,
    };

    tracing::info!("Using database at {}", db_path.display());

    let server = TrackerServer::new(db_path).await?;
    server.run().await?;

    tracing::info!("Server shut down");
    Ok(())
}

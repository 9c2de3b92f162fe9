use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notesync")]
#[command(about = "Sync a remote note service into a local markdown vault", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Vault root directory (overrides the configured path)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full sync cycle (push then pull, per the configured mode)
    #[command(alias = "s")]
    Sync,

    /// Push local edits to the remote store
    Push,

    /// Pull remote notes into the vault
    Pull,

    /// Show synced-note count, mode and last-sync time
    #[command(alias = "st")]
    Status,

    /// Create the sync folder and write a default configuration
    Init,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g. mode, folder, server-url)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Stratum CLI - manual SQL schema migrations
#[derive(Parser, Debug)]
#[command(name = "stratum")]
#[command(version)]
#[command(about = "Stratum - manual SQL schema migrations", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Echo migration SQL before executing it
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply forward migrations
    Up(UpArgs),

    /// Revert migrations down to a version
    Down(DownArgs),

    /// Record a version as applied without running it
    Stamp(StampArgs),

    /// Delete a version from the ledger
    Remove(RemoveArgs),

    /// Print the current version and exit with it as the status code
    Version,

    /// Scaffold the next pair of migration units
    New(NewArgs),

    /// Initialize a Stratum project
    Init(InitArgs),

    /// Direct database operations (create/drop/dump)
    Db(DbArgs),
}

// =============================================================================
// Migration Commands
// =============================================================================

/// Arguments for the `up` command
#[derive(Args, Debug)]
#[command(disable_version_flag = true)]
pub struct UpArgs {
    /// Target version (defaults to the highest available)
    pub version: Option<u64>,
}

/// Arguments for the `down` command
#[derive(Args, Debug)]
#[command(disable_version_flag = true)]
pub struct DownArgs {
    /// Target version to revert down to (exclusive)
    pub version: u64,
}

/// Arguments for the `stamp` command
#[derive(Args, Debug)]
#[command(disable_version_flag = true)]
pub struct StampArgs {
    /// Version to record (defaults to the highest available)
    pub version: Option<u64>,
}

/// Arguments for the `remove` command
#[derive(Args, Debug)]
#[command(disable_version_flag = true)]
pub struct RemoveArgs {
    /// Version to delete from the ledger
    pub version: u64,
}

// =============================================================================
// Scaffolding Commands
// =============================================================================

/// Arguments for the `new` command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Unit type to scaffold: 'sql' or 'script'
    #[arg(default_value = "sql")]
    pub kind: String,
}

/// Arguments for the `init` command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to initialize the project (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

// =============================================================================
// Db Command
// =============================================================================

/// Arguments for the `db` command
#[derive(Args, Debug)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbSubcommand,
}

/// Db subcommands
#[derive(Subcommand, Debug)]
pub enum DbSubcommand {
    /// Create the configured database
    Create,

    /// Drop the configured database
    Drop(DbDropArgs),

    /// Capture the live schema into migrations/up/0.sql
    Dump(DbDumpArgs),
}

/// Arguments for `db drop`
#[derive(Args, Debug)]
pub struct DbDropArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for `db dump`
#[derive(Args, Debug)]
pub struct DbDumpArgs {
    /// Output path (defaults to migrations/up/0.sql)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

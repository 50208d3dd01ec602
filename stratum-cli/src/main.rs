//! Stratum CLI - manual SQL schema migrations.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stratum_cli::cli::{Cli, Command};
use stratum_cli::commands;
use stratum_cli::error::CliResult;
use stratum_cli::output;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::newline();
            output::error(&e.to_string());
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> CliResult<i32> {
    let verbose = cli.verbose;
    match cli.command {
        Command::Up(args) => commands::up::run(args, verbose).await?,
        Command::Down(args) => commands::down::run(args, verbose).await?,
        Command::Stamp(args) => commands::stamp::run(args).await?,
        Command::Remove(args) => commands::remove::run(args).await?,
        // `version` sets its own exit status.
        Command::Version => return commands::version::run().await,
        Command::New(args) => commands::new::run(args).await?,
        Command::Init(args) => commands::init::run(args).await?,
        Command::Db(args) => commands::db::run(args).await?,
    }
    Ok(0)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

//! `stratum up` - apply forward migrations.

use crate::backend;
use crate::cli::UpArgs;
use crate::config::Config;
use crate::error::CliResult;
use crate::output::{self, success};

/// Run the up command
pub async fn run(args: UpArgs, verbose: bool) -> CliResult<()> {
    output::header("Migrate Up");

    let cwd = std::env::current_dir()?;
    let config = Config::load_or_default(&cwd)?;

    output::kv("Database", &config.display_url());
    output::kv("Migrations", &config.migrations.directory);
    match args.version {
        Some(v) => output::kv("Target", &v.to_string()),
        None => output::kv("Target", "latest"),
    }
    output::newline();

    let report = backend::up(&config, &cwd, args.version, verbose).await?;

    if report.is_empty() {
        output::info("Nothing to apply - database is up to date.");
        return Ok(());
    }

    for version in &report.applied {
        output::list_item(&format!("applied up/{version}"));
    }
    output::newline();
    success(&report.summary());

    Ok(())
}

//! `stratum down` - revert migrations.

use crate::backend;
use crate::cli::DownArgs;
use crate::config::Config;
use crate::error::CliResult;
use crate::output::{self, success};

/// Run the down command
pub async fn run(args: DownArgs, verbose: bool) -> CliResult<()> {
    output::header("Migrate Down");

    let cwd = std::env::current_dir()?;
    let config = Config::load_or_default(&cwd)?;

    output::kv("Database", &config.display_url());
    output::kv("Target", &args.version.to_string());
    output::newline();

    let report = backend::down(&config, &cwd, args.version, verbose).await?;

    if report.is_empty() {
        output::info("Nothing to revert.");
        return Ok(());
    }

    for version in &report.applied {
        output::list_item(&format!("reverted down/{version}"));
    }
    output::newline();
    success(&report.summary());

    Ok(())
}

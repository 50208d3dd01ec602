//! `stratum stamp` - record a version as applied without running it.

use crate::backend;
use crate::cli::StampArgs;
use crate::config::Config;
use crate::error::CliResult;
use crate::output::{self, success};

/// Run the stamp command
pub async fn run(args: StampArgs) -> CliResult<()> {
    output::header("Stamp");

    let cwd = std::env::current_dir()?;
    let config = Config::load_or_default(&cwd)?;

    output::kv("Database", &config.display_url());
    output::newline();

    let stamped = backend::stamp(&config, &cwd, args.version).await?;
    success(&format!("Version {stamped} recorded as applied (nothing executed)"));

    Ok(())
}

//! `stratum remove` - delete a version from the ledger.

use crate::backend;
use crate::cli::RemoveArgs;
use crate::config::Config;
use crate::error::CliResult;
use crate::output::{self, success};

/// Run the remove command
pub async fn run(args: RemoveArgs) -> CliResult<()> {
    output::header("Remove");

    let cwd = std::env::current_dir()?;
    let config = Config::load_or_default(&cwd)?;

    output::kv("Database", &config.display_url());
    output::newline();

    backend::remove(&config, &cwd, args.version).await?;
    success(&format!(
        "Version {} deleted from the ledger; its unit can be reapplied",
        args.version
    ));

    Ok(())
}

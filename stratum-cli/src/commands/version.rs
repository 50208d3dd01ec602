//! `stratum version` - print the current version.
//!
//! The current version doubles as the process exit status so shell scripts
//! can branch on it without parsing output; "none" exits 0.

use crate::backend;
use crate::config::Config;
use crate::error::CliResult;
use crate::output;

/// Run the version command, returning the desired exit code.
pub async fn run() -> CliResult<i32> {
    let cwd = std::env::current_dir()?;
    let config = Config::load_or_default(&cwd)?;

    match backend::current_version(&config, &cwd).await? {
        Some(version) => {
            println!("{version}");
            Ok(version.min(i32::MAX as u64) as i32)
        }
        None => {
            println!("none");
            output::dim("(no version recorded - ledger table absent or empty)");
            Ok(0)
        }
    }
}

//! `stratum init` - initialize a Stratum project.

use stratum_migrate::FileStore;

use crate::backend;
use crate::cli::InitArgs;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::CliResult;
use crate::output::{self, success};

/// Run the init command
pub async fn run(args: InitArgs) -> CliResult<()> {
    output::header("Initialize Stratum Project");

    let project_path = args
        .path
        .canonicalize()
        .unwrap_or_else(|_| args.path.clone());

    output::step(1, 3, "Creating migration directories...");
    let config = Config::load_or_default(&project_path)?;
    let store = FileStore::new(project_path.join(&config.migrations.directory));
    store.ensure_layout().await?;

    output::step(2, 3, "Writing configuration file...");
    let config_path = project_path.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        output::list_item(&format!("{CONFIG_FILE_NAME} already exists, leaving it alone"));
    } else {
        config.save(&config_path)?;
    }

    output::step(3, 3, "Preparing version ledger...");
    if config.database.url.is_some() || std::env::var("DATABASE_URL").is_ok() {
        match backend::ensure_ledger(&config, &project_path).await {
            Ok(()) => output::list_item("version table ready"),
            Err(e) => output::warn(&format!("could not prepare version table: {e}")),
        }
    } else {
        output::list_item("no database URL configured, skipping");
    }

    output::newline();
    success("Project initialized");
    output::newline();

    output::section("Next steps");
    output::list_item(&format!("Set database.url in {CONFIG_FILE_NAME}"));
    output::list_item("Run `stratum new sql` to scaffold your first migration");
    output::list_item("Run `stratum up` to apply it");

    Ok(())
}

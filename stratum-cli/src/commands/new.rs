//! `stratum new` - scaffold the next pair of migration units.

use std::path::PathBuf;

use stratum_migrate::{Direction, FileStore, MigrationError, UnitKind};

use crate::cli::NewArgs;
use crate::config::Config;
use crate::error::CliResult;
use crate::output::{self, success};

/// Run the new command
pub async fn run(args: NewArgs) -> CliResult<()> {
    output::header("New Migration");

    let cwd = std::env::current_dir()?;
    let config = Config::load_or_default(&cwd)?;

    let kind = UnitKind::from_extension(&args.kind)
        .ok_or_else(|| MigrationError::unsupported_type(&args.kind))?;

    let store = FileStore::new(cwd.join(&config.migrations.directory));
    store.ensure_layout().await?;
    let version = store.next_version().await?;

    let mut created = Vec::new();
    for direction in [Direction::Up, Direction::Down] {
        let path = store
            .direction_dir(direction)
            .join(format!("{version}.{}", kind.extension()));
        let content = match kind {
            UnitKind::Sql => sql_template(direction, version, &config.migrations.ledger_table),
            UnitKind::Script => script_template(direction, version),
        };
        tokio::fs::write(&path, content).await?;
        created.push(path);
    }

    for path in &created {
        output::list_item(&display_relative(path, &cwd));
    }
    output::newline();
    success(&format!("Migration {version} scaffolded"));

    if kind == UnitKind::Script {
        output::newline();
        output::info("Script units run from the embedding binary:");
        output::list_item(&format!(
            "register a ScriptUnit for (up, {version}) and (down, {version}) on the engine's registry"
        ));
    }

    Ok(())
}

/// SQL unit template. The trailing statement keeps the ledger convention:
/// each unit records (or erases) its own version as part of its own batch.
fn sql_template(direction: Direction, version: u64, ledger_table: &str) -> String {
    let date = chrono::Utc::now().format("%Y-%m-%d");
    let ledger_statement = match direction {
        Direction::Up => {
            format!("INSERT INTO {ledger_table} (version) VALUES ({version});")
        }
        Direction::Down => {
            format!("DELETE FROM {ledger_table} WHERE version = {version};")
        }
    };
    format!(
        "-- migration {version} ({direction}), created {date}\n\
         -- schema changes go here\n\
         \n\
         {ledger_statement}\n"
    )
}

/// Marker file for a script-typed unit; the behavior lives in a registered
/// `ScriptUnit`, not in this file.
fn script_template(direction: Direction, version: u64) -> String {
    format!(
        "script unit marker for version {version} ({direction})\n\
         \n\
         The behavior is supplied by a ScriptUnit registered for this\n\
         direction and version in the embedding binary. The unit must issue\n\
         its own db_version mutation and commit, like a SQL unit's text does.\n"
    )
}

fn display_relative(path: &PathBuf, base: &PathBuf) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

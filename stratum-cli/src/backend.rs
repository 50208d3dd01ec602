//! Engine construction per database provider.
//!
//! Each operation dispatches on the configured provider and monomorphizes
//! the engine over the matching session backend. Only providers with an
//! in-tree session backend can run engine operations; `mysql` is accepted
//! by the vendor tooling in `commands::db` but has no session here.

use std::path::Path;

use stratum_migrate::{EngineConfig, MigrationEngine, MigrationReport};
use stratum_postgres::PostgresSession;
use stratum_sqlite::SqliteSession;

use crate::config::Config;
use crate::error::{CliError, CliResult};

fn engine_config(config: &Config, project_dir: &Path) -> EngineConfig {
    EngineConfig::new()
        .migrations_dir(project_dir.join(&config.migrations.directory))
        .ledger_table(&config.migrations.ledger_table)
}

async fn sqlite_engine(
    config: &Config,
    project_dir: &Path,
) -> CliResult<MigrationEngine<SqliteSession>> {
    let session = SqliteSession::connect_url(config.database_url()?).await?;
    Ok(MigrationEngine::new(engine_config(config, project_dir), session))
}

async fn postgres_engine(
    config: &Config,
    project_dir: &Path,
) -> CliResult<MigrationEngine<PostgresSession>> {
    let session = PostgresSession::connect(config.database_url()?).await?;
    Ok(MigrationEngine::new(engine_config(config, project_dir), session))
}

fn unsupported(provider: &str) -> CliError {
    CliError::Config(format!(
        "provider '{provider}' has no migration session backend (expected 'sqlite' or 'postgres')"
    ))
}

/// Apply forward migrations.
pub async fn up(
    config: &Config,
    project_dir: &Path,
    target: Option<u64>,
    verbose: bool,
) -> CliResult<MigrationReport> {
    match config.database.provider.as_str() {
        "sqlite" => Ok(sqlite_engine(config, project_dir).await?.up(target, verbose).await?),
        "postgres" | "postgresql" => Ok(postgres_engine(config, project_dir)
            .await?
            .up(target, verbose)
            .await?),
        other => Err(unsupported(other)),
    }
}

/// Revert migrations down to a target.
pub async fn down(
    config: &Config,
    project_dir: &Path,
    target: u64,
    verbose: bool,
) -> CliResult<MigrationReport> {
    match config.database.provider.as_str() {
        "sqlite" => Ok(sqlite_engine(config, project_dir).await?.down(target, verbose).await?),
        "postgres" | "postgresql" => Ok(postgres_engine(config, project_dir)
            .await?
            .down(target, verbose)
            .await?),
        other => Err(unsupported(other)),
    }
}

/// Record a version as applied without executing it.
pub async fn stamp(config: &Config, project_dir: &Path, version: Option<u64>) -> CliResult<u64> {
    match config.database.provider.as_str() {
        "sqlite" => Ok(sqlite_engine(config, project_dir).await?.stamp(version).await?),
        "postgres" | "postgresql" => {
            Ok(postgres_engine(config, project_dir).await?.stamp(version).await?)
        }
        other => Err(unsupported(other)),
    }
}

/// Delete a version from the ledger.
pub async fn remove(config: &Config, project_dir: &Path, version: u64) -> CliResult<()> {
    match config.database.provider.as_str() {
        "sqlite" => Ok(sqlite_engine(config, project_dir).await?.remove(version).await?),
        "postgres" | "postgresql" => {
            Ok(postgres_engine(config, project_dir).await?.remove(version).await?)
        }
        other => Err(unsupported(other)),
    }
}

/// Read the current version.
pub async fn current_version(config: &Config, project_dir: &Path) -> CliResult<Option<u64>> {
    match config.database.provider.as_str() {
        "sqlite" => Ok(sqlite_engine(config, project_dir).await?.current_version().await),
        "postgres" | "postgresql" => {
            Ok(postgres_engine(config, project_dir).await?.current_version().await)
        }
        other => Err(unsupported(other)),
    }
}

/// Create the version table if absent.
pub async fn ensure_ledger(config: &Config, project_dir: &Path) -> CliResult<()> {
    match config.database.provider.as_str() {
        "sqlite" => Ok(sqlite_engine(config, project_dir).await?.ensure_ledger().await?),
        "postgres" | "postgresql" => {
            Ok(postgres_engine(config, project_dir).await?.ensure_ledger().await?)
        }
        other => Err(unsupported(other)),
    }
}

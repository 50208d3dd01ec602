//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CliError, CliResult};

/// Default config file name (lives in project root)
pub const CONFIG_FILE_NAME: &str = "stratum.toml";

/// Default migrations directory (relative to project root)
pub const MIGRATIONS_DIR: &str = "migrations";

/// Stratum CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Migration configuration
    pub migrations: MigrationsConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> CliResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `stratum.toml` from a project directory, falling back to
    /// defaults when absent.
    pub fn load_or_default(dir: &Path) -> CliResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// The effective database URL: config value, then `DATABASE_URL`.
    pub fn database_url(&self) -> CliResult<String> {
        self.database
            .url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .ok_or_else(|| {
                CliError::Config(
                    "no database URL: set database.url in stratum.toml or DATABASE_URL".to_string(),
                )
            })
    }

    /// The URL as shown to the user, without requiring one to be set.
    pub fn display_url(&self) -> String {
        self.database
            .url
            .clone()
            .unwrap_or_else(|| "env(DATABASE_URL)".to_string())
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database provider (sqlite, postgres, mysql)
    pub provider: String,

    /// Database connection URL
    pub url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: "sqlite".to_string(),
            url: None,
        }
    }
}

/// Migration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationsConfig {
    /// Directory for migration units (holding up/ and down/)
    pub directory: String,

    /// Version table name
    pub ledger_table: String,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            directory: MIGRATIONS_DIR.to_string(),
            ledger_table: stratum_migrate::LEDGER_TABLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn defaults_are_sqlite_with_standard_layout() {
        let config = Config::default();
        assert_eq!(config.database.provider, "sqlite");
        assert_eq!(config.migrations.directory, "migrations");
        assert_eq!(config.migrations.ledger_table, "db_version");
    }

    #[test]
    fn round_trips_through_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.database.provider = "postgres".to_string();
        config.database.url = Some("postgres://localhost/app".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.database.provider, "postgres");
        assert_eq!(loaded.database.url.as_deref(), Some("postgres://localhost/app"));
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[database]\nprovider = \"postgres\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.database.provider, "postgres");
        assert_eq!(config.migrations.ledger_table, "db_version");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(tmp.path()).unwrap();
        assert_eq!(config.database.provider, "sqlite");
    }
}

//! SQLite implementation of the migration session.

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use tracing::debug;

use stratum_migrate::error::MigrateResult;
use stratum_migrate::session::Session;

use crate::config::{DatabasePath, SqliteConfig};
use crate::error::{SqliteError, SqliteResult};

/// A migration session over a single SQLite connection.
///
/// SQLite autocommits by default, so the session begins a deferred
/// transaction lazily on the first write and ends it on commit/rollback.
/// Reads never open a transaction.
pub struct SqliteSession {
    conn: Connection,
}

impl SqliteSession {
    /// Open a session from configuration.
    pub async fn connect(config: SqliteConfig) -> SqliteResult<Self> {
        let conn = match &config.path {
            DatabasePath::Memory => Connection::open_in_memory().await?,
            DatabasePath::File(path) => Connection::open(path.clone()).await?,
        };

        let pragmas = config.pragma_sql();
        if !pragmas.is_empty() {
            conn.call(move |conn| Ok(conn.execute_batch(&pragmas)?)).await?;
        }

        debug!(path = config.path.as_str(), "opened sqlite session");
        Ok(Self { conn })
    }

    /// Open a session from a database URL.
    pub async fn connect_url(url: impl AsRef<str>) -> SqliteResult<Self> {
        Self::connect(SqliteConfig::from_url(url)?).await
    }

    /// Get the inner connection.
    pub fn inner(&self) -> &Connection {
        &self.conn
    }
}

#[async_trait]
impl Session for SqliteSession {
    fn product(&self) -> &str {
        "sqlite"
    }

    async fn execute_batch(&self, sql: &str) -> MigrateResult<()> {
        let sql = sql.to_string();
        debug!(sql = %sql, "executing batch");

        self.conn
            .call(move |conn| {
                if conn.is_autocommit() {
                    conn.execute_batch("BEGIN")?;
                }
                conn.execute_batch(&sql)?;
                Ok(())
            })
            .await
            .map_err(|e| SqliteError::from(e).into())
    }

    async fn query_scalar(&self, sql: &str) -> MigrateResult<Option<i64>> {
        let sql = sql.to_string();
        debug!(sql = %sql, "querying scalar");

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                match stmt.query_row([], |row| row.get::<_, Option<i64>>(0)) {
                    Ok(value) => Ok(value),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(tokio_rusqlite::Error::Rusqlite(e)),
                }
            })
            .await
            .map_err(|e| SqliteError::from(e).into())
    }

    async fn commit(&self) -> MigrateResult<()> {
        self.conn
            .call(|conn| {
                if !conn.is_autocommit() {
                    conn.execute_batch("COMMIT")?;
                }
                Ok(())
            })
            .await
            .map_err(|e| SqliteError::from(e).into())
    }

    async fn rollback(&self) -> MigrateResult<()> {
        self.conn
            .call(|conn| {
                if !conn.is_autocommit() {
                    conn.execute_batch("ROLLBACK")?;
                }
                Ok(())
            })
            .await
            .map_err(|e| SqliteError::from(e).into())
    }
}

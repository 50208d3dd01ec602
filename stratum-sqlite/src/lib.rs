//! SQLite session backend for the Stratum migration engine.
//!
//! Provides [`SqliteSession`], an implementation of
//! [`stratum_migrate::Session`] over `tokio-rusqlite`, plus URL/config
//! parsing for `sqlite://` connection strings.
//!
//! # Example
//!
//! ```rust,ignore
//! use stratum_migrate::{EngineConfig, MigrationEngine};
//! use stratum_sqlite::SqliteSession;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = SqliteSession::connect_url("sqlite://./app.db").await?;
//!     let mut engine = MigrationEngine::new(EngineConfig::new(), session);
//!     engine.up(None, false).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod session;

pub use config::{DatabasePath, SqliteConfig};
pub use error::{SqliteError, SqliteResult};
pub use session::SqliteSession;

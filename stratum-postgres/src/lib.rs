//! PostgreSQL session backend for the Stratum migration engine.
//!
//! Provides [`PostgresSession`], an implementation of
//! [`stratum_migrate::Session`] over `tokio-postgres`.
//!
//! # Example
//!
//! ```rust,ignore
//! use stratum_migrate::{EngineConfig, MigrationEngine};
//! use stratum_postgres::PostgresSession;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = PostgresSession::connect("postgres://localhost:5432/app").await?;
//!     let mut engine = MigrationEngine::new(EngineConfig::new(), session);
//!     engine.up(None, false).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod session;

pub use error::{PostgresError, PostgresResult};
pub use session::PostgresSession;

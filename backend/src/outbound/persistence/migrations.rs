//! Embedded schema migrations.
//!
//! Migrations run over a blocking `PgConnection`; call
//! [`run_pending_migrations`] from `spawn_blocking` inside async code.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while migrating the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("migration connection failed: {message}")]
    Connection { message: String },
    #[error("migration failed: {message}")]
    Apply { message: String },
}

/// Apply every pending migration and return how many ran.
///
/// # Errors
/// [`MigrationError::Connection`] when the database is unreachable and
/// [`MigrationError::Apply`] when a migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| {
        MigrationError::Connection {
            message: err.to_string(),
        }
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}

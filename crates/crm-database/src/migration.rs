//! Schema migrations, embedded at compile time.

use sqlx::PgPool;
use tracing::info;

use crm_core::error::{AppError, ErrorKind};

/// Apply any schema migrations the database has not seen yet.
///
/// The migration files under `migrations/` are compiled into the binary,
/// so a deployed server carries its own schema history. Already-applied
/// versions are skipped; a checksum mismatch against an applied version
/// is an error.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(
        available = migrator.iter().count(),
        "Applying schema migrations"
    );

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Schema migration failed: {e}"), e)
    })?;

    info!("Schema is up to date");
    Ok(())
}

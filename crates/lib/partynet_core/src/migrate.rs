//! Schema for users, groups and group memberships.

use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};

/// SQL files under `partynet_core/migrations/`, compiled into the binary.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Bring the directory schema up to date. Already applied steps are skipped.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

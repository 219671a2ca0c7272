//! Database Module
//!
//! PostgreSQL connection pool, migrations, and transaction management.

pub mod unit_of_work;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;
use crate::shared::error::AppError;

pub use unit_of_work::{PgTransaction, PgUnitOfWork};

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Map a unique-constraint violation to a domain conflict, leaving every
/// other database error untouched.
pub(crate) fn on_unique_violation(conflict: AppError) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => conflict,
        _ => AppError::Database(e),
    }
}

//! Unit of Work Pattern Implementation
//!
//! Provides transactional boundaries for database operations.
//! Ensures all operations within a business transaction succeed or fail together.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};

use crate::domain::{AddressRepository, DeviceRepository, Transaction, UnitOfWork, UserRepository};
use crate::shared::error::AppError;

/// PostgreSQL Unit of Work implementation.
#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    /// Create from a PgPool directly.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn begin(&self) -> Result<Box<dyn Transaction>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgTransaction { tx }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Transaction context that wraps a SQLx transaction.
///
/// The repository traits are implemented directly on this type in
/// `infrastructure::repositories`, so every query runs on `tx`.
pub struct PgTransaction {
    pub(crate) tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl Transaction for PgTransaction {
    fn devices(&mut self) -> &mut dyn DeviceRepository {
        self
    }

    fn users(&mut self) -> &mut dyn UserRepository {
        self
    }

    fn addresses(&mut self) -> &mut dyn AddressRepository {
        self
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await.map_err(AppError::Database)
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        self.tx.rollback().await.map_err(AppError::Database)
    }
}

//! Unit of Work contracts
//!
//! Every write operation runs inside one transaction opened through a
//! [`UnitOfWork`]. The open [`Transaction`] hands out the repositories bound
//! to it, so all reads and writes of one operation see the same snapshot and
//! commit or roll back together.

use async_trait::async_trait;

use super::entities::{AddressRepository, DeviceRepository, UserRepository};
use crate::shared::error::AppError;

/// An open transaction against the persistence store.
///
/// Dropping a transaction without committing rolls it back.
#[async_trait]
pub trait Transaction: Send {
    /// Device repository bound to this transaction.
    fn devices(&mut self) -> &mut dyn DeviceRepository;

    /// User repository bound to this transaction.
    fn users(&mut self) -> &mut dyn UserRepository;

    /// Address repository bound to this transaction.
    fn addresses(&mut self) -> &mut dyn AddressRepository;

    /// Make all changes of this transaction visible.
    async fn commit(self: Box<Self>) -> Result<(), AppError>;

    /// Discard all changes of this transaction.
    async fn rollback(self: Box<Self>) -> Result<(), AppError>;
}

/// Factory for transactions against one persistence store.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Begin a new transaction.
    async fn begin(&self) -> Result<Box<dyn Transaction>, AppError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;

    /// Short name of the backing store, used in health output.
    fn backend(&self) -> &'static str;
}

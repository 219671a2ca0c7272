//! Address entity and repository trait.
//!
//! Maps to the `addresses` table. An address is owned by exactly one user
//! and is written before the user that references it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Postal address of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub street: String,
    pub city: String,
    pub number: String,
    pub zip_code: String,
    pub country: String,
}

/// An address that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub number: String,
    pub zip_code: String,
    pub country: String,
}

/// Repository trait for Address data access operations.
#[async_trait]
pub trait AddressRepository: Send {
    /// Insert a new address, returning it with its generated ID.
    async fn create(&mut self, address: &NewAddress) -> Result<Address, AppError>;

    /// Delete an address by ID.
    async fn delete(&mut self, id: i64) -> Result<(), AppError>;
}

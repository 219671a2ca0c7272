//! Device entity and repository trait.
//!
//! Maps to the `devices` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A registered device.
///
/// Maps to the `devices` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - serial_number: VARCHAR(255) NOT NULL UNIQUE
/// - uuid: VARCHAR(255) NOT NULL UNIQUE
/// - phone_number: VARCHAR(255) NOT NULL
/// - model: VARCHAR(255) NOT NULL
/// - user_id: BIGINT NULL REFERENCES users(id) ON DELETE CASCADE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Generated identity
    pub id: i64,

    /// Manufacturer serial number (globally unique)
    pub serial_number: String,

    /// Device UUID (globally unique)
    pub uuid: String,

    /// Phone number bound to the device
    pub phone_number: String,

    /// Device model name
    pub model: String,

    /// User the device is assigned to, if any.
    /// This is a reference, not ownership: the device outlives its assignment.
    pub user_id: Option<i64>,
}

impl Device {
    /// Whether the device is linked to the given user.
    pub fn is_assigned_to(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }

    /// Whether the device is linked to someone other than the given user.
    pub fn is_assigned_to_other_than(&self, user_id: i64) -> bool {
        matches!(self.user_id, Some(owner) if owner != user_id)
    }

    /// Link the device to a user.
    pub fn assign_to(&mut self, user_id: i64) {
        self.user_id = Some(user_id);
    }
}

/// A device that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDevice {
    pub serial_number: String,
    pub uuid: String,
    pub phone_number: String,
    pub model: String,
}

/// Repository trait for Device data access operations.
///
/// Repositories are bound to an open transaction; every call runs inside it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceRepository: Send {
    /// Find a device by ID.
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Device>, AppError>;

    /// Find a device by ID and lock it until the transaction ends.
    async fn find_by_id_for_update(&mut self, id: i64) -> Result<Option<Device>, AppError>;

    /// Find a device by serial number.
    async fn find_by_serial_number(
        &mut self,
        serial_number: &str,
    ) -> Result<Option<Device>, AppError>;

    /// Find a device by UUID.
    async fn find_by_uuid(&mut self, uuid: &str) -> Result<Option<Device>, AppError>;

    /// Find a device only if it is assigned to the given user.
    async fn find_by_user_id_and_device_id(
        &mut self,
        user_id: i64,
        device_id: i64,
    ) -> Result<Option<Device>, AppError>;

    /// Insert a new device, returning it with its generated ID.
    async fn create(&mut self, device: &NewDevice) -> Result<Device, AppError>;

    /// Persist all fields of an existing device.
    async fn update(&mut self, device: &Device) -> Result<Device, AppError>;

    /// Delete every device assigned to the given user.
    async fn delete_by_user_id(&mut self, user_id: i64) -> Result<u64, AppError>;
}

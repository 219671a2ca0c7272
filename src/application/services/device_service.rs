//! Device Service
//!
//! Creates and looks up devices. Creation runs the device validation chain
//! inside the same transaction that inserts the row.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::validators::{default_device_validators, DeviceValidator};
use crate::domain::{Device, DeviceRepository, NewDevice, UnitOfWork};
use crate::infrastructure::metrics::record_operation;
use crate::shared::error::AppError;

/// Device service trait
#[async_trait]
pub trait DeviceService: Send + Sync {
    /// Validate and persist a new device
    async fn create(&self, device: NewDevice) -> Result<Device, AppError>;

    /// Persist an already validated device in its own transaction
    async fn update(&self, device: &Device) -> Result<Device, AppError>;

    /// Get device by ID
    async fn get_by_id(&self, id: i64) -> Result<Device, AppError>;

    /// Get device by ID inside the caller's transaction
    async fn get_by_id_within(
        &self,
        devices: &mut dyn DeviceRepository,
        id: i64,
    ) -> Result<Device, AppError>;

    /// Get device by ID inside the caller's transaction, locking it until
    /// that transaction ends
    async fn lock_by_id_within(
        &self,
        devices: &mut dyn DeviceRepository,
        id: i64,
    ) -> Result<Device, AppError>;

    /// Persist a device inside the caller's transaction
    async fn update_within(
        &self,
        devices: &mut dyn DeviceRepository,
        device: &Device,
    ) -> Result<Device, AppError>;
}

/// DeviceService implementation
pub struct DeviceServiceImpl {
    uow: Arc<dyn UnitOfWork>,
    validators: Vec<Box<dyn DeviceValidator>>,
}

impl DeviceServiceImpl {
    pub fn new(uow: Arc<dyn UnitOfWork>, validators: Vec<Box<dyn DeviceValidator>>) -> Self {
        Self { uow, validators }
    }

    /// Service with the serial number and UUID checks registered.
    pub fn with_default_validators(uow: Arc<dyn UnitOfWork>) -> Self {
        Self::new(uow, default_device_validators())
    }

    async fn create_inner(&self, device: &NewDevice) -> Result<Device, AppError> {
        let mut tx = self.uow.begin().await?;

        for validator in &self.validators {
            if let Err(e) = validator.validate(tx.devices(), device).await {
                tracing::warn!(validator = validator.name(), error = %e, "Device rejected");
                return Err(e);
            }
        }

        let created = tx.devices().create(device).await?;
        tx.commit().await?;
        Ok(created)
    }
}

#[async_trait]
impl DeviceService for DeviceServiceImpl {
    #[tracing::instrument(skip(self, device), fields(serial_number = %device.serial_number))]
    async fn create(&self, device: NewDevice) -> Result<Device, AppError> {
        let result = self.create_inner(&device).await;
        record_operation("device_create", &result);

        if let Ok(created) = &result {
            tracing::info!(device_id = created.id, "Device created");
        }
        result
    }

    #[tracing::instrument(skip(self, device), fields(device_id = device.id))]
    async fn update(&self, device: &Device) -> Result<Device, AppError> {
        let mut tx = self.uow.begin().await?;
        let updated = self.update_within(tx.devices(), device).await?;
        tx.commit().await?;
        Ok(updated)
    }

    async fn get_by_id(&self, id: i64) -> Result<Device, AppError> {
        let mut tx = self.uow.begin().await?;
        let device = self.get_by_id_within(tx.devices(), id).await?;
        tx.rollback().await?;
        Ok(device)
    }

    async fn get_by_id_within(
        &self,
        devices: &mut dyn DeviceRepository,
        id: i64,
    ) -> Result<Device, AppError> {
        devices
            .find_by_id(id)
            .await?
            .ok_or_else(AppError::device_not_found)
    }

    async fn lock_by_id_within(
        &self,
        devices: &mut dyn DeviceRepository,
        id: i64,
    ) -> Result<Device, AppError> {
        devices
            .find_by_id_for_update(id)
            .await?
            .ok_or_else(AppError::device_not_found)
    }

    async fn update_within(
        &self,
        devices: &mut dyn DeviceRepository,
        device: &Device,
    ) -> Result<Device, AppError> {
        devices.update(device).await
    }
}

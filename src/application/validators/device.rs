//! Device creation validators.

use async_trait::async_trait;

use crate::domain::{DeviceRepository, NewDevice};
use crate::shared::error::AppError;

/// A precondition checked before a device is created.
#[async_trait]
pub trait DeviceValidator: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Fail if the candidate device may not be created.
    async fn validate(
        &self,
        devices: &mut dyn DeviceRepository,
        device: &NewDevice,
    ) -> Result<(), AppError>;
}

/// Rejects a device whose serial number is already registered.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeviceSerialNumberValidator;

#[async_trait]
impl DeviceValidator for DeviceSerialNumberValidator {
    fn name(&self) -> &'static str {
        "serial_number"
    }

    async fn validate(
        &self,
        devices: &mut dyn DeviceRepository,
        device: &NewDevice,
    ) -> Result<(), AppError> {
        if devices
            .find_by_serial_number(&device.serial_number)
            .await?
            .is_some()
        {
            return Err(AppError::DeviceAlreadyExists);
        }
        Ok(())
    }
}

/// Rejects a device whose UUID is already registered.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeviceUuidValidator;

#[async_trait]
impl DeviceValidator for DeviceUuidValidator {
    fn name(&self) -> &'static str {
        "uuid"
    }

    async fn validate(
        &self,
        devices: &mut dyn DeviceRepository,
        device: &NewDevice,
    ) -> Result<(), AppError> {
        if devices.find_by_uuid(&device.uuid).await?.is_some() {
            return Err(AppError::DeviceAlreadyExists);
        }
        Ok(())
    }
}

/// The device creation chain, in evaluation order.
pub fn default_device_validators() -> Vec<Box<dyn DeviceValidator>> {
    vec![
        Box::new(DeviceSerialNumberValidator),
        Box::new(DeviceUuidValidator),
    ]
}

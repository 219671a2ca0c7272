//! Device assignment validators.
//!
//! Each validator reads the current device state on its own; they do not
//! share the device loaded by the caller.

use async_trait::async_trait;

use crate::domain::DeviceRepository;
use crate::shared::error::AppError;

/// A precondition checked before a device is assigned to a user.
#[async_trait]
pub trait DeviceAssignValidator: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Fail if `device_id` may not be assigned to `user_id`.
    async fn validate(
        &self,
        devices: &mut dyn DeviceRepository,
        user_id: i64,
        device_id: i64,
    ) -> Result<(), AppError>;
}

/// Rejects assigning a device to the user who already holds it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeviceAlreadyAssignedToMeValidator;

#[async_trait]
impl DeviceAssignValidator for DeviceAlreadyAssignedToMeValidator {
    fn name(&self) -> &'static str {
        "already_assigned_to_me"
    }

    async fn validate(
        &self,
        devices: &mut dyn DeviceRepository,
        user_id: i64,
        device_id: i64,
    ) -> Result<(), AppError> {
        if devices
            .find_by_user_id_and_device_id(user_id, device_id)
            .await?
            .is_some()
        {
            return Err(AppError::DeviceAlreadyAssignedToMe);
        }
        Ok(())
    }
}

/// Rejects assigning a device that another user already holds.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeviceAlreadyAssignedToAnotherUserValidator;

#[async_trait]
impl DeviceAssignValidator for DeviceAlreadyAssignedToAnotherUserValidator {
    fn name(&self) -> &'static str {
        "already_assigned_to_another_user"
    }

    async fn validate(
        &self,
        devices: &mut dyn DeviceRepository,
        user_id: i64,
        device_id: i64,
    ) -> Result<(), AppError> {
        // A missing device is reported by the device lookup, not here.
        if let Some(device) = devices.find_by_id(device_id).await? {
            if device.is_assigned_to_other_than(user_id) {
                return Err(AppError::DeviceAlreadyAssignedToAnotherUser);
            }
        }
        Ok(())
    }
}

/// The assignment chain, in evaluation order.
pub fn default_assign_validators() -> Vec<Box<dyn DeviceAssignValidator>> {
    vec![
        Box::new(DeviceAlreadyAssignedToMeValidator),
        Box::new(DeviceAlreadyAssignedToAnotherUserValidator),
    ]
}

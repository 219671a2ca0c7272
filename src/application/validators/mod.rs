//! Validation Chains
//!
//! Ordered lists of independent precondition checks. A chain runs every
//! validator in registration order and stops at the first failure. New rules
//! are added by registering another validator, not by editing the services.

mod assignment;
mod device;

pub use assignment::{
    default_assign_validators, DeviceAlreadyAssignedToAnotherUserValidator,
    DeviceAlreadyAssignedToMeValidator, DeviceAssignValidator,
};
pub use device::{
    default_device_validators, DeviceSerialNumberValidator, DeviceUuidValidator, DeviceValidator,
};

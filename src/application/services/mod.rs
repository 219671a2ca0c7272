//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **DeviceService**: Device registration and lookup
//! - **UserService**: User registration, device assignment, listing and removal

pub mod device_service;
pub mod user_service;

pub use device_service::{DeviceService, DeviceServiceImpl};
pub use user_service::{UserService, UserServiceImpl};

//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{
    AddressRequest, AssignDeviceParams, CreateDeviceRequest, CreateUserRequest, ListUsersParams,
};
pub use response::{AddressResponse, DeviceResponse, PageResponse, UserResponse};

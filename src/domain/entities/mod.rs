//! # Domain Entities
//!
//! Core domain entities of the registry. All entities map directly to their
//! corresponding database tables.
//!
//! - **User**: a person, created together with its address
//! - **Address**: postal address owned by exactly one user
//! - **Device**: a device that can be assigned to at most one user
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod address;
mod device;
mod user;

pub use address::{Address, AddressRepository, NewAddress};
pub use device::{Device, DeviceRepository, NewDevice};
pub use user::{NewUser, User, UserRepository, UserSort, UserSortField};

#[cfg(test)]
pub use device::MockDeviceRepository;

//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! The traits are implemented on [`PgTransaction`], so a repository is
//! only ever reached through an open transaction:
//!
//! ```rust,ignore
//! let mut tx = unit_of_work.begin().await?;
//! let device = tx.devices().find_by_serial_number("ABC-123").await?;
//! tx.commit().await?;
//! ```
//!
//! ## Available Repositories
//!
//! - **DeviceRepository** - Devices and their assignment reference
//! - **UserRepository** - Users joined with address and devices
//! - **AddressRepository** - Addresses owned by users
//!
//! [`PgTransaction`]: crate::infrastructure::database::PgTransaction

mod address_repository;
mod device_repository;
mod user_repository;

//! # Domain Layer
//!
//! The domain layer contains the core records of the registry and the
//! contracts used to store them. It is independent of any web framework.
//!
//! ## Structure
//!
//! - **entities**: User, Address and Device plus their repository traits
//! - **value_objects**: Pagination and sorting types
//! - **unit_of_work**: Transaction boundary shared by all repositories

pub mod entities;
pub mod unit_of_work;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use unit_of_work::{Transaction, UnitOfWork};
pub use value_objects::*;

//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! - **PageRequest / Page**: paginated listing input and output
//! - **Sort / Order**: ordered sort terms, parsed from
//!   `property[,property...][,asc|desc][,ignorecase]`

mod page;

pub use page::*;

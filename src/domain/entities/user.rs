//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::address::{Address, NewAddress};
use super::device::Device;
use crate::domain::value_objects::{Page, PageRequest, Sort, SortField};
use crate::shared::error::AppError;

/// Represents a registered user.
///
/// Maps to the `users` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - first_name: VARCHAR(255) NOT NULL
/// - last_name: VARCHAR(255) NOT NULL
/// - birthday: DATE NOT NULL
/// - address_id: BIGINT NOT NULL UNIQUE REFERENCES addresses(id)
/// - UNIQUE (first_name, last_name, birthday)
///
/// Loaded eagerly with its address and assigned devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Generated identity
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    /// Date of birth (always in the past)
    pub birthday: NaiveDate,

    /// Owned address (1:1)
    pub address: Address,

    /// Devices assigned to this user, ordered by device ID
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// A user that has not been persisted yet, together with its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub address: NewAddress,
}

/// Properties a user listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortField {
    Id,
    FirstName,
    #[default]
    LastName,
    Birthday,
}

impl UserSortField {
    /// Column in the `users` table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Birthday => "birthday",
        }
    }

    /// Whether the property holds text, so case can be ignored.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::FirstName | Self::LastName)
    }
}

impl SortField for UserSortField {
    const ENTITY: &'static str = "User";

    fn from_property(property: &str) -> Option<Self> {
        match property {
            "id" => Some(Self::Id),
            "firstName" => Some(Self::FirstName),
            "lastName" => Some(Self::LastName),
            "birthday" => Some(Self::Birthday),
            _ => None,
        }
    }

    fn property(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Birthday => "birthday",
        }
    }
}

/// Ordering of a user listing.
pub type UserSort = Sort<UserSortField>;

impl Default for UserSort {
    fn default() -> Self {
        Sort::asc(UserSortField::LastName)
    }
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual storage interactions.
/// Users are returned with their address and devices attached.
#[async_trait]
pub trait UserRepository: Send {
    /// Find a user by ID.
    async fn find_by_id(&mut self, id: i64) -> Result<Option<User>, AppError>;

    /// Find a user by the (first name, last name, birthday) identity triple.
    async fn find_by_first_name_and_last_name_and_birthday(
        &mut self,
        first_name: &str,
        last_name: &str,
        birthday: NaiveDate,
    ) -> Result<Option<User>, AppError>;

    /// Insert a new user referencing an already persisted address.
    async fn create(&mut self, user: &NewUser, address: &Address) -> Result<User, AppError>;

    /// Fetch one page of users.
    async fn find_all(&mut self, page: &PageRequest<UserSort>) -> Result<Page<User>, AppError>;

    /// Delete a user row by ID.
    async fn delete(&mut self, id: i64) -> Result<(), AppError>;
}

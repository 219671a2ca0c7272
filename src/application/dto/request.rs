//! Request DTOs
//!
//! Data structures for API request bodies and query strings.
//!
//! Body fields are optional at the serde level so that missing and `null`
//! values surface as field errors from `validate()` rather than as JSON
//! syntax errors. Text fields are capped at the 255 characters their
//! columns hold.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::config::PaginationSettings;
use crate::domain::{NewAddress, NewDevice, NewUser, PageRequest, UserSort};
use crate::shared::error::AppError;
use crate::shared::validation::{not_blank, past_date};

/// Create device request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceRequest {
    #[validate(
        required(message = "Serial number can not be null or blank"),
        custom(function = "not_blank", message = "Serial number can not be null or blank"),
        length(max = 255, message = "Serial number can not be longer than 255 characters")
    )]
    pub serial_number: Option<String>,

    #[validate(
        required(message = "Uuid can not be null or blank"),
        custom(function = "not_blank", message = "Uuid can not be null or blank"),
        length(max = 255, message = "Uuid can not be longer than 255 characters")
    )]
    pub uuid: Option<String>,

    #[validate(
        required(message = "Phone number can not be null or blank"),
        custom(function = "not_blank", message = "Phone number can not be null or blank"),
        length(max = 255, message = "Phone number can not be longer than 255 characters")
    )]
    pub phone_number: Option<String>,

    #[validate(
        required(message = "Model can not be null or blank"),
        custom(function = "not_blank", message = "Model can not be null or blank"),
        length(max = 255, message = "Model can not be longer than 255 characters")
    )]
    pub model: Option<String>,
}

impl From<CreateDeviceRequest> for NewDevice {
    fn from(request: CreateDeviceRequest) -> Self {
        Self {
            serial_number: request.serial_number.unwrap_or_default(),
            uuid: request.uuid.unwrap_or_default(),
            phone_number: request.phone_number.unwrap_or_default(),
            model: request.model.unwrap_or_default(),
        }
    }
}

/// Address part of a create user request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[validate(
        required(message = "Street can not be null or blank"),
        custom(function = "not_blank", message = "Street can not be null or blank"),
        length(max = 255, message = "Street can not be longer than 255 characters")
    )]
    pub street: Option<String>,

    #[validate(
        required(message = "City can not be null or blank"),
        custom(function = "not_blank", message = "City can not be null or blank"),
        length(max = 255, message = "City can not be longer than 255 characters")
    )]
    pub city: Option<String>,

    #[validate(
        required(message = "Number can not be null or blank"),
        custom(function = "not_blank", message = "Number can not be null or blank"),
        length(max = 255, message = "Number can not be longer than 255 characters")
    )]
    pub number: Option<String>,

    #[validate(
        required(message = "Zip code can not be null or blank"),
        custom(function = "not_blank", message = "Zip code can not be null or blank"),
        length(max = 255, message = "Zip code can not be longer than 255 characters")
    )]
    pub zip_code: Option<String>,

    #[validate(
        required(message = "Country can not be null or blank"),
        custom(function = "not_blank", message = "Country can not be null or blank"),
        length(max = 255, message = "Country can not be longer than 255 characters")
    )]
    pub country: Option<String>,
}

impl From<AddressRequest> for NewAddress {
    fn from(request: AddressRequest) -> Self {
        Self {
            street: request.street.unwrap_or_default(),
            city: request.city.unwrap_or_default(),
            number: request.number.unwrap_or_default(),
            zip_code: request.zip_code.unwrap_or_default(),
            country: request.country.unwrap_or_default(),
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(
        required(message = "First name can not be null or blank"),
        custom(function = "not_blank", message = "First name can not be null or blank"),
        length(max = 255, message = "First name can not be longer than 255 characters")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "Last name can not be null or blank"),
        custom(function = "not_blank", message = "Last name can not be null or blank"),
        length(max = 255, message = "Last name can not be longer than 255 characters")
    )]
    pub last_name: Option<String>,

    /// A missing address is reported field by field.
    #[serde(default)]
    #[validate(nested)]
    pub address: AddressRequest,

    #[validate(
        required(message = "Date of birth can not be null"),
        custom(function = "past_date", message = "Date of birth should be a past date")
    )]
    pub birthday: Option<NaiveDate>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            first_name: request.first_name.unwrap_or_default(),
            last_name: request.last_name.unwrap_or_default(),
            birthday: request.birthday.unwrap_or_default(),
            address: request.address.into(),
        }
    }
}

/// Query string of `POST /users/assign`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignDeviceParams {
    pub user_id: i64,
    pub device_id: i64,
}

/// Query string of `GET /users`
///
/// `sort` may repeat; earlier parameters take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    #[serde(default)]
    pub sort: Vec<String>,
}

impl ListUsersParams {
    /// Resolve defaults and limits into a page request.
    ///
    /// A size of zero falls back to the default size; sizes above the
    /// maximum are clamped. A sort naming no property means the default
    /// ordering.
    pub fn into_page_request(
        self,
        settings: &PaginationSettings,
    ) -> Result<PageRequest<UserSort>, AppError> {
        let size = match self.size {
            None | Some(0) => settings.default_size,
            Some(size) => size.min(settings.max_size),
        };

        let sort = UserSort::parse_all(self.sort.iter().map(String::as_str))?;
        let sort = if sort.is_unsorted() {
            UserSort::default()
        } else {
            sort
        };

        Ok(PageRequest::new(self.page.unwrap_or(0), size, sort))
    }
}

//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Address, Device, Page, User};

/// Device response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    pub id: i64,
    pub serial_number: String,
    pub uuid: String,
    pub phone_number: String,
    pub model: String,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            serial_number: device.serial_number,
            uuid: device.uuid,
            phone_number: device.phone_number,
            model: device.model,
        }
    }
}

/// Address response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub street: String,
    pub city: String,
    pub number: String,
    pub zip_code: String,
    pub country: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            street: address.street,
            city: address.city,
            number: address.number,
            zip_code: address.zip_code,
            country: address.country,
        }
    }
}

/// User response, including address and assigned devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: AddressResponse,
    pub birthday: NaiveDate,
    #[serde(default)]
    pub devices: Vec<DeviceResponse>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            address: user.address.into(),
            birthday: user.birthday,
            devices: user.devices.into_iter().map(Into::into).collect(),
        }
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub size: u32,
    pub number: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T, U> From<Page<U>> for PageResponse<T>
where
    U: Into<T>,
{
    fn from(page: Page<U>) -> Self {
        let total_pages = page.total_pages();
        let first = page.is_first();
        let last = page.is_last();
        let page = page.map(Into::into);
        let number_of_elements = page.content.len();

        Self {
            total_elements: page.total_elements,
            total_pages,
            size: page.size,
            number: page.number,
            number_of_elements,
            first,
            last,
            empty: number_of_elements == 0,
            content: page.content,
        }
    }
}

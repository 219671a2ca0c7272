//! In-Memory Store
//!
//! A process-local persistence backend with the same contracts as the
//! PostgreSQL store: generated identities, unique constraints on device
//! serial numbers, device UUIDs and the user identity triple, and
//! transactional commit/rollback.
//!
//! Transactions are serialized: `begin` takes an owned lock on the state and
//! works on a copy, which `commit` writes back. Dropping the transaction
//! releases the lock and discards the copy.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{
    Address, AddressRepository, Device, DeviceRepository, NewAddress, NewDevice, NewUser, Order,
    Page, PageRequest, Transaction, UnitOfWork, User, UserRepository, UserSort, UserSortField,
};
use crate::shared::error::AppError;

/// Stored user row; address and devices are joined on read.
#[derive(Debug, Clone)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    birthday: NaiveDate,
    address_id: i64,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: BTreeMap<i64, UserRow>,
    addresses: BTreeMap<i64, Address>,
    devices: BTreeMap<i64, Device>,
    last_user_id: i64,
    last_address_id: i64,
    last_device_id: i64,
}

impl MemoryState {
    fn hydrate(&self, row: &UserRow) -> Result<User, AppError> {
        let address = self.addresses.get(&row.address_id).cloned().ok_or_else(|| {
            AppError::Internal(format!(
                "User {} references missing address {}",
                row.id, row.address_id
            ))
        })?;

        let devices = self
            .devices
            .values()
            .filter(|d| d.is_assigned_to(row.id))
            .cloned()
            .collect();

        Ok(User {
            id: row.id,
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            birthday: row.birthday,
            address,
            devices,
        })
    }
}

/// Unit of work over a shared in-memory state.
#[derive(Clone, Default)]
pub struct MemoryUnitOfWork {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn begin(&self) -> Result<Box<dyn Transaction>, AppError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, working }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// An open in-memory transaction.
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl Transaction for MemoryTransaction {
    fn devices(&mut self) -> &mut dyn DeviceRepository {
        self
    }

    fn users(&mut self) -> &mut dyn UserRepository {
        self
    }

    fn addresses(&mut self) -> &mut dyn AddressRepository {
        self
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemoryTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl DeviceRepository for MemoryTransaction {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Device>, AppError> {
        Ok(self.working.devices.get(&id).cloned())
    }

    async fn find_by_id_for_update(&mut self, id: i64) -> Result<Option<Device>, AppError> {
        // The whole state is already locked by this transaction.
        Ok(self.working.devices.get(&id).cloned())
    }

    async fn find_by_serial_number(
        &mut self,
        serial_number: &str,
    ) -> Result<Option<Device>, AppError> {
        Ok(self
            .working
            .devices
            .values()
            .find(|d| d.serial_number == serial_number)
            .cloned())
    }

    async fn find_by_uuid(&mut self, uuid: &str) -> Result<Option<Device>, AppError> {
        Ok(self
            .working
            .devices
            .values()
            .find(|d| d.uuid == uuid)
            .cloned())
    }

    async fn find_by_user_id_and_device_id(
        &mut self,
        user_id: i64,
        device_id: i64,
    ) -> Result<Option<Device>, AppError> {
        Ok(self
            .working
            .devices
            .get(&device_id)
            .filter(|d| d.is_assigned_to(user_id))
            .cloned())
    }

    async fn create(&mut self, device: &NewDevice) -> Result<Device, AppError> {
        let duplicate = self
            .working
            .devices
            .values()
            .any(|d| d.serial_number == device.serial_number || d.uuid == device.uuid);
        if duplicate {
            return Err(AppError::DeviceAlreadyExists);
        }

        self.working.last_device_id += 1;
        let created = Device {
            id: self.working.last_device_id,
            serial_number: device.serial_number.clone(),
            uuid: device.uuid.clone(),
            phone_number: device.phone_number.clone(),
            model: device.model.clone(),
            user_id: None,
        };
        self.working.devices.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&mut self, device: &Device) -> Result<Device, AppError> {
        if let Some(owner) = device.user_id {
            if !self.working.users.contains_key(&owner) {
                return Err(AppError::user_not_found());
            }
        }

        let stored = self
            .working
            .devices
            .get_mut(&device.id)
            .ok_or_else(AppError::device_not_found)?;
        *stored = device.clone();
        Ok(device.clone())
    }

    async fn delete_by_user_id(&mut self, user_id: i64) -> Result<u64, AppError> {
        let before = self.working.devices.len();
        self.working.devices.retain(|_, d| !d.is_assigned_to(user_id));
        Ok((before - self.working.devices.len()) as u64)
    }
}

#[async_trait]
impl UserRepository for MemoryTransaction {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<User>, AppError> {
        self.working
            .users
            .get(&id)
            .map(|row| self.working.hydrate(row))
            .transpose()
    }

    async fn find_by_first_name_and_last_name_and_birthday(
        &mut self,
        first_name: &str,
        last_name: &str,
        birthday: NaiveDate,
    ) -> Result<Option<User>, AppError> {
        self.working
            .users
            .values()
            .find(|u| {
                u.first_name == first_name && u.last_name == last_name && u.birthday == birthday
            })
            .map(|row| self.working.hydrate(row))
            .transpose()
    }

    async fn create(&mut self, user: &NewUser, address: &Address) -> Result<User, AppError> {
        let duplicate = self.working.users.values().any(|u| {
            u.first_name == user.first_name
                && u.last_name == user.last_name
                && u.birthday == user.birthday
        });
        if duplicate {
            return Err(AppError::UserAlreadyExists);
        }
        if !self.working.addresses.contains_key(&address.id) {
            return Err(AppError::Internal(format!(
                "Address {} does not exist",
                address.id
            )));
        }

        self.working.last_user_id += 1;
        let row = UserRow {
            id: self.working.last_user_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            birthday: user.birthday,
            address_id: address.id,
        };
        self.working.users.insert(row.id, row.clone());
        self.working.hydrate(&row)
    }

    async fn find_all(&mut self, page: &PageRequest<UserSort>) -> Result<Page<User>, AppError> {
        let mut rows: Vec<&UserRow> = self.working.users.values().collect();
        rows.sort_by(|a, b| {
            page.sort
                .orders()
                .iter()
                .fold(Ordering::Equal, |ordering, order| {
                    ordering.then_with(|| order.direction.apply(compare_users(a, b, order)))
                })
                .then(a.id.cmp(&b.id))
        });

        let total = rows.len() as u64;
        let content = rows
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.size as usize)
            .map(|row| self.working.hydrate(row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, page.page, page.size, total))
    }

    async fn delete(&mut self, id: i64) -> Result<(), AppError> {
        if self.working.devices.values().any(|d| d.is_assigned_to(id)) {
            return Err(AppError::Internal(format!(
                "User {} still has assigned devices",
                id
            )));
        }
        self.working
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(AppError::user_not_found)
    }
}

#[async_trait]
impl AddressRepository for MemoryTransaction {
    async fn create(&mut self, address: &NewAddress) -> Result<Address, AppError> {
        self.working.last_address_id += 1;
        let created = Address {
            id: self.working.last_address_id,
            street: address.street.clone(),
            city: address.city.clone(),
            number: address.number.clone(),
            zip_code: address.zip_code.clone(),
            country: address.country.clone(),
        };
        self.working.addresses.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete(&mut self, id: i64) -> Result<(), AppError> {
        if self.working.users.values().any(|u| u.address_id == id) {
            return Err(AppError::Internal(format!(
                "Address {} is still referenced by a user",
                id
            )));
        }
        self.working
            .addresses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Address not found".into()))
    }
}

/// Ascending comparison of two users on one sort term.
fn compare_users(a: &UserRow, b: &UserRow, order: &Order<UserSortField>) -> Ordering {
    let text = |x: &str, y: &str| {
        if order.ignore_case {
            x.to_lowercase().cmp(&y.to_lowercase())
        } else {
            x.cmp(y)
        }
    };
    match order.field {
        UserSortField::Id => a.id.cmp(&b.id),
        UserSortField::FirstName => text(a.first_name.as_str(), b.first_name.as_str()),
        UserSortField::LastName => text(a.last_name.as_str(), b.last_name.as_str()),
        UserSortField::Birthday => a.birthday.cmp(&b.birthday),
    }
}

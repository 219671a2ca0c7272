//! User Service
//!
//! Handles user registration, device assignment, listing and removal.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::services::DeviceService;
use crate::application::validators::{default_assign_validators, DeviceAssignValidator};
use crate::domain::{NewUser, Page, PageRequest, UnitOfWork, User, UserSort};
use crate::infrastructure::metrics::record_operation;
use crate::shared::error::AppError;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a user together with its address
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    /// Assign an existing device to an existing user.
    ///
    /// Returns the user as it was loaded before the assignment.
    async fn assign_device(&self, user_id: i64, device_id: i64) -> Result<User, AppError>;

    /// Get one page of users
    async fn list(&self, page: PageRequest<UserSort>) -> Result<Page<User>, AppError>;

    /// Get user by ID
    async fn get_by_id(&self, id: i64) -> Result<User, AppError>;

    /// Delete a user with its devices and address
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

/// UserService implementation
pub struct UserServiceImpl {
    uow: Arc<dyn UnitOfWork>,
    device_service: Arc<dyn DeviceService>,
    validators: Vec<Box<dyn DeviceAssignValidator>>,
}

impl UserServiceImpl {
    pub fn new(
        uow: Arc<dyn UnitOfWork>,
        device_service: Arc<dyn DeviceService>,
        validators: Vec<Box<dyn DeviceAssignValidator>>,
    ) -> Self {
        Self {
            uow,
            device_service,
            validators,
        }
    }

    /// Service with both assignment checks registered.
    pub fn with_default_validators(
        uow: Arc<dyn UnitOfWork>,
        device_service: Arc<dyn DeviceService>,
    ) -> Self {
        Self::new(uow, device_service, default_assign_validators())
    }

    async fn create_inner(&self, user: &NewUser) -> Result<User, AppError> {
        let mut tx = self.uow.begin().await?;

        let existing = tx
            .users()
            .find_by_first_name_and_last_name_and_birthday(
                &user.first_name,
                &user.last_name,
                user.birthday,
            )
            .await?;
        if existing.is_some() {
            return Err(AppError::UserAlreadyExists);
        }

        let address = tx.addresses().create(&user.address).await?;
        let created = tx.users().create(user, &address).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn assign_inner(&self, user_id: i64, device_id: i64) -> Result<User, AppError> {
        let mut tx = self.uow.begin().await?;

        let user = tx
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(AppError::user_not_found)?;

        let mut device = self
            .device_service
            .lock_by_id_within(tx.devices(), device_id)
            .await?;

        for validator in &self.validators {
            if let Err(e) = validator.validate(tx.devices(), user_id, device_id).await {
                tracing::warn!(validator = validator.name(), error = %e, "Assignment rejected");
                return Err(e);
            }
        }

        device.assign_to(user.id);
        self.device_service
            .update_within(tx.devices(), &device)
            .await?;
        tx.commit().await?;

        Ok(user)
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[tracing::instrument(skip(self, user), fields(last_name = %user.last_name))]
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let result = self.create_inner(&user).await;
        record_operation("user_create", &result);

        match &result {
            Ok(created) => tracing::info!(user_id = created.id, "User created"),
            Err(AppError::UserAlreadyExists) => tracing::warn!("User already exists"),
            Err(_) => {}
        }
        result
    }

    #[tracing::instrument(skip(self))]
    async fn assign_device(&self, user_id: i64, device_id: i64) -> Result<User, AppError> {
        let result = self.assign_inner(user_id, device_id).await;
        record_operation("device_assign", &result);

        if result.is_ok() {
            tracing::info!("Device assigned");
        }
        result
    }

    #[tracing::instrument(skip(self), fields(page = page.page, size = page.size, sort = %page.sort))]
    async fn list(&self, page: PageRequest<UserSort>) -> Result<Page<User>, AppError> {
        let mut tx = self.uow.begin().await?;
        let users = tx.users().find_all(&page).await?;
        tx.rollback().await?;
        Ok(users)
    }

    async fn get_by_id(&self, id: i64) -> Result<User, AppError> {
        let mut tx = self.uow.begin().await?;
        let user = tx
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(AppError::user_not_found)?;
        tx.rollback().await?;
        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.uow.begin().await?;

        let user = tx
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(AppError::user_not_found)?;

        let removed = tx.devices().delete_by_user_id(user.id).await?;
        tx.users().delete(user.id).await?;
        tx.addresses().delete(user.address.id).await?;
        tx.commit().await?;

        tracing::info!(devices_removed = removed, "User deleted");
        Ok(())
    }
}

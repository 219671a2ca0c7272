//! Device Repository Implementation
//!
//! PostgreSQL implementation of the DeviceRepository trait.
//! Maps between the `devices` table and the domain Device entity.

use async_trait::async_trait;

use crate::domain::{Device, DeviceRepository, NewDevice};
use crate::infrastructure::database::{on_unique_violation, PgTransaction};
use crate::shared::error::AppError;

/// Database row representation of the devices table.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct DeviceRow {
    id: i64,
    serial_number: String,
    uuid: String,
    phone_number: String,
    model: String,
    pub(super) user_id: Option<i64>,
}

impl DeviceRow {
    /// Convert database row to domain Device entity.
    pub(super) fn into_device(self) -> Device {
        Device {
            id: self.id,
            serial_number: self.serial_number,
            uuid: self.uuid,
            phone_number: self.phone_number,
            model: self.model,
            user_id: self.user_id,
        }
    }
}

pub(super) const DEVICE_COLUMNS: &str = "id, serial_number, uuid, phone_number, model, user_id";

#[async_trait]
impl DeviceRepository for PgTransaction {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Device>, AppError> {
        let row = sqlx::query_as::<_, DeviceRow>(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(DeviceRow::into_device))
    }

    /// Row lock held until commit or rollback.
    async fn find_by_id_for_update(&mut self, id: i64) -> Result<Option<Device>, AppError> {
        let row = sqlx::query_as::<_, DeviceRow>(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(DeviceRow::into_device))
    }

    async fn find_by_serial_number(
        &mut self,
        serial_number: &str,
    ) -> Result<Option<Device>, AppError> {
        let row = sqlx::query_as::<_, DeviceRow>(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE serial_number = $1"
        ))
        .bind(serial_number)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(DeviceRow::into_device))
    }

    async fn find_by_uuid(&mut self, uuid: &str) -> Result<Option<Device>, AppError> {
        let row = sqlx::query_as::<_, DeviceRow>(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE uuid = $1"
        ))
        .bind(uuid)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(DeviceRow::into_device))
    }

    async fn find_by_user_id_and_device_id(
        &mut self,
        user_id: i64,
        device_id: i64,
    ) -> Result<Option<Device>, AppError> {
        let row = sqlx::query_as::<_, DeviceRow>(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE id = $1 AND user_id = $2"
        ))
        .bind(device_id)
        .bind(user_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(DeviceRow::into_device))
    }

    async fn create(&mut self, device: &NewDevice) -> Result<Device, AppError> {
        let row = sqlx::query_as::<_, DeviceRow>(&format!(
            r#"
            INSERT INTO devices (serial_number, uuid, phone_number, model)
            VALUES ($1, $2, $3, $4)
            RETURNING {DEVICE_COLUMNS}
            "#
        ))
        .bind(&device.serial_number)
        .bind(&device.uuid)
        .bind(&device.phone_number)
        .bind(&device.model)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(on_unique_violation(AppError::DeviceAlreadyExists))?;

        Ok(row.into_device())
    }

    async fn update(&mut self, device: &Device) -> Result<Device, AppError> {
        let row = sqlx::query_as::<_, DeviceRow>(&format!(
            r#"
            UPDATE devices
            SET serial_number = $2,
                uuid = $3,
                phone_number = $4,
                model = $5,
                user_id = $6
            WHERE id = $1
            RETURNING {DEVICE_COLUMNS}
            "#
        ))
        .bind(device.id)
        .bind(&device.serial_number)
        .bind(&device.uuid)
        .bind(&device.phone_number)
        .bind(&device.model)
        .bind(device.user_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(on_unique_violation(AppError::DeviceAlreadyExists))?
        .ok_or_else(AppError::device_not_found)?;

        Ok(row.into_device())
    }

    async fn delete_by_user_id(&mut self, user_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM devices WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }
}

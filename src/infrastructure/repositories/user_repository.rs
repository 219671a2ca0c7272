//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Users are read joined with their address; assigned devices are loaded
//! with one extra query per call.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::device_repository::{DeviceRow, DEVICE_COLUMNS};
use crate::domain::{
    Address, Device, NewUser, Page, PageRequest, User, UserRepository, UserSort,
    UserSortField,
};
use crate::infrastructure::database::{on_unique_violation, PgTransaction};
use crate::shared::error::AppError;

/// A users row joined with its address.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    birthday: NaiveDate,
    address_id: i64,
    street: String,
    city: String,
    number: String,
    zip_code: String,
    country: String,
}

impl UserRow {
    /// Convert database row to domain User entity.
    fn into_user(self, devices: Vec<Device>) -> User {
        User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            birthday: self.birthday,
            address: Address {
                id: self.address_id,
                street: self.street,
                city: self.city,
                number: self.number,
                zip_code: self.zip_code,
                country: self.country,
            },
            devices,
        }
    }
}

const USER_SELECT: &str = r#"
    SELECT u.id, u.first_name, u.last_name, u.birthday, u.address_id,
           a.street, a.city, a.number, a.zip_code, a.country
    FROM users u
    JOIN addresses a ON a.id = u.address_id
"#;

impl PgTransaction {
    /// Devices assigned to any of the given users, grouped by user ID.
    async fn devices_by_user(
        &mut self,
        user_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Device>>, AppError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, DeviceRow>(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE user_id = ANY($1) ORDER BY id"
        ))
        .bind(user_ids)
        .fetch_all(&mut *self.tx)
        .await?;

        let mut grouped: HashMap<i64, Vec<Device>> = HashMap::new();
        for row in rows {
            if let Some(user_id) = row.user_id {
                grouped.entry(user_id).or_default().push(row.into_device());
            }
        }
        Ok(grouped)
    }

    async fn hydrate(&mut self, rows: Vec<UserRow>) -> Result<Vec<User>, AppError> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut devices = self.devices_by_user(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let assigned = devices.remove(&row.id).unwrap_or_default();
                row.into_user(assigned)
            })
            .collect())
    }

    async fn hydrate_one(&mut self, row: Option<UserRow>) -> Result<Option<User>, AppError> {
        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

/// `ORDER BY` terms for a user listing, ending with the id tie-break.
///
/// Columns and directions come from closed enums, never from input.
fn order_by(sort: &UserSort) -> String {
    let mut terms: Vec<String> = sort
        .orders()
        .iter()
        .map(|order| {
            let column = format!("u.{}", order.field.column());
            let expression = if order.ignore_case && order.field.is_text() {
                format!("LOWER({})", column)
            } else {
                column
            };
            format!("{} {}", expression, order.direction.as_sql())
        })
        .collect();
    if !sort.orders().iter().any(|o| o.field == UserSortField::Id) {
        terms.push("u.id ASC".into());
    }
    terms.join(", ")
}

#[async_trait]
impl UserRepository for PgTransaction {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{USER_SELECT} WHERE u.id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;

        self.hydrate_one(row).await
    }

    async fn find_by_first_name_and_last_name_and_birthday(
        &mut self,
        first_name: &str,
        last_name: &str,
        birthday: NaiveDate,
    ) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "{USER_SELECT} WHERE u.first_name = $1 AND u.last_name = $2 AND u.birthday = $3"
        ))
        .bind(first_name)
        .bind(last_name)
        .bind(birthday)
        .fetch_optional(&mut *self.tx)
        .await?;

        self.hydrate_one(row).await
    }

    async fn create(&mut self, user: &NewUser, address: &Address) -> Result<User, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (first_name, last_name, birthday, address_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.birthday)
        .bind(address.id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(on_unique_violation(AppError::UserAlreadyExists))?;

        Ok(User {
            id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            birthday: user.birthday,
            address: address.clone(),
            devices: Vec::new(),
        })
    }

    async fn find_all(&mut self, page: &PageRequest<UserSort>) -> Result<Page<User>, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *self.tx)
            .await?;

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{USER_SELECT} ORDER BY {} LIMIT $1 OFFSET $2",
            order_by(&page.sort),
        ))
        .bind(i64::from(page.size))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&mut *self.tx)
        .await?;

        let users = self.hydrate(rows).await?;
        Ok(Page::new(
            users,
            page.page,
            page.size,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn delete(&mut self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::user_not_found());
        }
        Ok(())
    }
}

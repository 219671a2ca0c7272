//! Address Repository Implementation
//!
//! PostgreSQL implementation of the AddressRepository trait.

use async_trait::async_trait;

use crate::domain::{Address, AddressRepository, NewAddress};
use crate::infrastructure::database::PgTransaction;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: i64,
    street: String,
    city: String,
    number: String,
    zip_code: String,
    country: String,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            street: row.street,
            city: row.city,
            number: row.number,
            zip_code: row.zip_code,
            country: row.country,
        }
    }
}

#[async_trait]
impl AddressRepository for PgTransaction {
    async fn create(&mut self, address: &NewAddress) -> Result<Address, AppError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            INSERT INTO addresses (street, city, number, zip_code, country)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, street, city, number, zip_code, country
            "#,
        )
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.number)
        .bind(&address.zip_code)
        .bind(&address.country)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(row.into())
    }

    async fn delete(&mut self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Address not found".into()));
        }
        Ok(())
    }
}

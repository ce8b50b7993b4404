//! Customer repository for database operations.
//!
//! Queries use runtime binding rather than compile-time checked macros so
//! the crate builds without a live database. Stored TEXT columns are parsed
//! back into domain types with a `DataCorruption` error path.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use clientele_core::{Customer, CustomerId, CustomerUpdate, NewCustomer};

use super::RepositoryError;

const SELECT_COLUMNS: &str =
    "SELECT id, name, date_of_birth, member_number, interests, created_at FROM customers";

/// Raw row shape as stored in `SQLite`.
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: String,
    name: String,
    date_of_birth: String,
    member_number: i64,
    interests: String,
    created_at: String,
}

impl CustomerRow {
    fn try_into_customer(self) -> Result<Customer, RepositoryError> {
        let id: CustomerId = self.id.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid customer id in database: {e}"))
        })?;

        let date_of_birth = NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d")
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid date_of_birth in database: {e}"))
            })?;

        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid created_at in database: {e}"))
            })?;

        Ok(Customer {
            id,
            name: self.name,
            date_of_birth,
            member_number: self.member_number,
            interests: self.interests,
            created_at,
        })
    }
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a validated customer, assigning its id and creation time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewCustomer) -> Result<Customer, RepositoryError> {
        let customer = Customer {
            id: CustomerId::generate(),
            name: new.name.clone(),
            date_of_birth: new.date_of_birth,
            member_number: new.member_number,
            interests: new.interests.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO customers (id, name, date_of_birth, member_number, interests, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(customer.id.to_string())
        .bind(&customer.name)
        .bind(customer.date_of_birth.to_string())
        .bind(customer.member_number)
        .bind(&customer.interests)
        .bind(customer.created_at.to_rfc3339())
        .execute(self.pool)
        .await?;

        Ok(customer)
    }

    /// Get a customer by id. `None` is the absence signal.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id.to_string())
            .fetch_optional(self.pool)
            .await?;

        row.map(CustomerRow::try_into_customer).transpose()
    }

    /// List all customers in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!("{SELECT_COLUMNS} ORDER BY rowid"))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter()
            .map(CustomerRow::try_into_customer)
            .collect()
    }

    /// Merge the supplied field subset into an existing customer.
    ///
    /// Omitted fields keep their stored values. Returns the updated document,
    /// or `None` if no customer with that id exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: CustomerId,
        changes: &CustomerUpdate,
    ) -> Result<Option<Customer>, RepositoryError> {
        if changes.is_empty() {
            return self.get(id).await;
        }

        let result = sqlx::query(
            r"
            UPDATE customers
            SET name = COALESCE(?1, name),
                date_of_birth = COALESCE(?2, date_of_birth),
                member_number = COALESCE(?3, member_number),
                interests = COALESCE(?4, interests)
            WHERE id = ?5
            ",
        )
        .bind(changes.name.as_deref())
        .bind(changes.date_of_birth.map(|d| d.to_string()))
        .bind(changes.member_number)
        .bind(changes.interests.as_deref())
        .bind(id.to_string())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(id).await
    }

    /// Delete a customer by id.
    ///
    /// # Returns
    ///
    /// Returns `true` if the customer was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id.to_string())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

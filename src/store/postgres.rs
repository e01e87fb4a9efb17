use async_trait::async_trait;
use sqlx::PgPool;

use super::{ContactStore, StoreError, StoreResult};
use crate::models::{Contact, ContactFilter};
use crate::schema;

pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::DuplicatePhone;
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn list(&self) -> StoreResult<Vec<Contact>> {
        let contacts = sqlx::query_as::<_, Contact>(schema::SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(contacts)
    }

    async fn get(&self, id: i32) -> StoreResult<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(schema::SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(contact)
    }

    async fn find_by_fields(&self, filter: &ContactFilter) -> StoreResult<Vec<Contact>> {
        let contacts = sqlx::query_as::<_, Contact>(schema::SELECT_BY_FIELDS)
            .bind(filter.first_name.as_deref())
            .bind(filter.last_name.as_deref())
            .bind(filter.address.as_deref())
            .bind(filter.phone.as_deref())
            .fetch_all(&self.pool)
            .await?;
        Ok(contacts)
    }

    async fn search(&self, needle: &str) -> StoreResult<Vec<Contact>> {
        let contacts = sqlx::query_as::<_, Contact>(schema::SELECT_MATCHING)
            .bind(needle)
            .fetch_all(&self.pool)
            .await?;
        Ok(contacts)
    }

    async fn phone_exists(&self, phone: &str) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(schema::PHONE_EXISTS)
            .bind(phone)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn exists(&self, id: i32) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(schema::ID_EXISTS)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert(&self, contact: &Contact) -> StoreResult<Contact> {
        sqlx::query_as::<_, Contact>(schema::INSERT)
            .bind(&contact.first_name)
            .bind(&contact.last_name)
            .bind(&contact.address)
            .bind(&contact.phone)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn update(&self, contact: &Contact) -> StoreResult<bool> {
        let result = sqlx::query(schema::UPDATE)
            .bind(contact.id)
            .bind(&contact.first_name)
            .bind(&contact.last_name)
            .bind(&contact.address)
            .bind(&contact.phone)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> StoreResult<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(schema::DELETE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(contact)
    }
}

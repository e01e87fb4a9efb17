//! Persistence seam for contacts.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Contact, ContactFilter};

#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::MemoryContactStore;
pub use postgres::PgContactStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The phone unique constraint rejected the write.
    #[error("phone already exists")]
    DuplicatePhone,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Contact>>;

    async fn get(&self, id: i32) -> StoreResult<Option<Contact>>;

    /// Returns at most two matches, which is enough to detect ambiguity.
    async fn find_by_fields(&self, filter: &ContactFilter) -> StoreResult<Vec<Contact>>;

    /// Contacts with `needle` as a case-sensitive substring of any text field.
    async fn search(&self, needle: &str) -> StoreResult<Vec<Contact>>;

    async fn phone_exists(&self, phone: &str) -> StoreResult<bool>;

    async fn exists(&self, id: i32) -> StoreResult<bool>;

    /// Inserts a new row, ignoring `contact.id`, and returns it with the assigned id.
    async fn insert(&self, contact: &Contact) -> StoreResult<Contact>;

    /// Overwrites the row with `contact.id`. Returns false if no row was written.
    async fn update(&self, contact: &Contact) -> StoreResult<bool>;

    async fn delete(&self, id: i32) -> StoreResult<Option<Contact>>;
}

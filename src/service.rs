use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::models::{normalize_phone, Contact, ContactFilter};
use crate::store::{ContactStore, StoreError};

#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Contact>, ApiError> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: i32) -> Result<Contact, ApiError> {
        self.store.get(id).await?.ok_or(ApiError::NotFound)
    }

    /// The single contact matching every supplied field.
    pub async fn find_one(&self, filter: ContactFilter) -> Result<Contact, ApiError> {
        let filter = filter.normalized();
        let mut found = self.store.find_by_fields(&filter).await?;
        match found.len() {
            0 => Err(ApiError::NotFound),
            1 => Ok(found.remove(0)),
            _ => {
                debug!(?filter, "field lookup matched several contacts");
                Err(ApiError::Ambiguous)
            }
        }
    }

    pub async fn search(&self, query: Option<&str>) -> Result<Vec<Contact>, ApiError> {
        let query = match query {
            Some(q) if !q.is_empty() => q,
            _ => return Err(ApiError::NotFound),
        };

        let found = self.store.search(query).await?;
        if found.is_empty() {
            return Err(ApiError::NotFound);
        }
        Ok(found)
    }

    pub async fn create(&self, mut contact: Contact) -> Result<Contact, ApiError> {
        contact.phone = normalize_phone(&contact.phone);
        contact.validate()?;

        // The unique constraint is authoritative; this only spares a failed insert.
        if self.store.phone_exists(&contact.phone).await? {
            debug!(phone = %contact.phone, "rejecting duplicate phone");
            return Err(ApiError::DuplicatePhone);
        }

        let created = self.store.insert(&contact).await?;
        info!(contact_id = created.id, "contact created");
        Ok(created)
    }

    /// Replaces every field of contact `id`. The phone is stored as given.
    pub async fn update(&self, id: i32, contact: Contact) -> Result<(), ApiError> {
        if contact.id != id {
            debug!(path_id = id, body_id = contact.id, "update id mismatch");
            return Err(ApiError::IdMismatch);
        }
        contact.validate()?;

        let written = self.store.update(&contact).await.map_err(|e| match e {
            StoreError::DuplicatePhone => ApiError::PhoneInUse,
            other => other.into(),
        })?;
        if written {
            info!(contact_id = id, "contact updated");
            return Ok(());
        }

        if self.store.exists(id).await? {
            warn!(contact_id = id, "update wrote no rows although the contact exists");
            Err(ApiError::Inconsistent(id))
        } else {
            Err(ApiError::NotFound)
        }
    }

    pub async fn delete(&self, id: i32) -> Result<Contact, ApiError> {
        let deleted = self.store.delete(id).await?.ok_or(ApiError::NotFound)?;
        info!(contact_id = id, "contact deleted");
        Ok(deleted)
    }
}

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{ContactStore, StoreError, StoreResult};
use crate::models::{Contact, ContactFilter};

/// In-process store with the same identity and uniqueness rules as the table.
#[derive(Default)]
pub struct MemoryContactStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Vec<Contact>,
    last_id: i32,
    drop_before_update: bool,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the target row right before the next update is applied, as a
    /// concurrent delete would.
    pub fn delete_before_next_update(&self) {
        self.inner.lock().drop_before_update = true;
    }
}

fn filter_matches(filter: &ContactFilter, contact: &Contact) -> bool {
    fn eq(wanted: &Option<String>, actual: &str) -> bool {
        wanted.as_deref().map_or(true, |w| w.is_empty() || w == actual)
    }

    eq(&filter.first_name, &contact.first_name)
        && eq(&filter.last_name, &contact.last_name)
        && eq(&filter.address, &contact.address)
        && eq(&filter.phone, &contact.phone)
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn list(&self) -> StoreResult<Vec<Contact>> {
        Ok(self.inner.lock().rows.clone())
    }

    async fn get(&self, id: i32) -> StoreResult<Option<Contact>> {
        Ok(self.inner.lock().rows.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_fields(&self, filter: &ContactFilter) -> StoreResult<Vec<Contact>> {
        let inner = self.inner.lock();
        Ok(inner
            .rows
            .iter()
            .filter(|c| filter_matches(filter, c))
            .take(2)
            .cloned()
            .collect())
    }

    async fn search(&self, needle: &str) -> StoreResult<Vec<Contact>> {
        let inner = self.inner.lock();
        Ok(inner
            .rows
            .iter()
            .filter(|c| {
                c.first_name.contains(needle)
                    || c.last_name.contains(needle)
                    || c.address.contains(needle)
                    || c.phone.contains(needle)
            })
            .cloned()
            .collect())
    }

    async fn phone_exists(&self, phone: &str) -> StoreResult<bool> {
        Ok(self.inner.lock().rows.iter().any(|c| c.phone == phone))
    }

    async fn exists(&self, id: i32) -> StoreResult<bool> {
        Ok(self.inner.lock().rows.iter().any(|c| c.id == id))
    }

    async fn insert(&self, contact: &Contact) -> StoreResult<Contact> {
        let mut inner = self.inner.lock();
        if inner.rows.iter().any(|c| c.phone == contact.phone) {
            return Err(StoreError::DuplicatePhone);
        }

        inner.last_id += 1;
        let stored = Contact {
            id: inner.last_id,
            ..contact.clone()
        };
        inner.rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, contact: &Contact) -> StoreResult<bool> {
        let mut inner = self.inner.lock();
        if std::mem::take(&mut inner.drop_before_update) {
            inner.rows.retain(|c| c.id != contact.id);
        }

        if inner
            .rows
            .iter()
            .any(|c| c.id != contact.id && c.phone == contact.phone)
        {
            return Err(StoreError::DuplicatePhone);
        }

        match inner.rows.iter_mut().find(|c| c.id == contact.id) {
            Some(row) => {
                *row = contact.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> StoreResult<Option<Contact>> {
        let mut inner = self.inner.lock();
        let pos = inner.rows.iter().position(|c| c.id == id);
        Ok(pos.map(|i| inner.rows.remove(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(first: &str, phone: &str) -> Contact {
        Contact {
            id: 0,
            first_name: first.into(),
            last_name: "Doe".into(),
            address: "1 Main St".into(),
            phone: phone.into(),
        }
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = MemoryContactStore::new();
        let a = store.insert(&contact("A", "1")).await.unwrap();
        store.delete(a.id).await.unwrap();
        let b = store.insert(&contact("B", "2")).await.unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn filter_matching_is_exact_with_wildcards() {
        let mia = contact("Mia", "1");
        let wildcard = ContactFilter {
            first_name: Some("Mia".into()),
            phone: Some(String::new()),
            ..Default::default()
        };
        assert!(filter_matches(&wildcard, &mia));

        let wrong_case = ContactFilter {
            first_name: Some("mia".into()),
            ..Default::default()
        };
        assert!(!filter_matches(&wrong_case, &mia));
    }

    #[tokio::test]
    async fn insert_enforces_unique_phone() {
        let store = MemoryContactStore::new();
        store.insert(&contact("A", "1")).await.unwrap();
        let err = store.insert(&contact("B", "1")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicatePhone));
    }
}

use std::collections::{hash_map::Entry, HashMap};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CustomerStore, InsertOutcome};
use crate::accounts::models::Customer;

/// In-process store keyed by username. Used by tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryCustomerStore {
    customers: RwLock<HashMap<String, Customer>>,
}

impl MemoryCustomerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Customer>> {
        Ok(self.customers.read().await.get(username).cloned())
    }

    async fn insert_if_absent(&self, customer: &Customer) -> Result<InsertOutcome> {
        // Check and insert happen under one write guard.
        let mut customers = self.customers.write().await;
        match customers.entry(customer.username.clone()) {
            Entry::Occupied(_) => Ok(InsertOutcome::Conflict),
            Entry::Vacant(slot) => {
                slot.insert(customer.clone());
                Ok(InsertOutcome::Created)
            }
        }
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn customer(username: &str) -> Customer {
        Customer {
            username: username.to_string(),
            age: 30,
            password_hash: "$argon2id$stub".to_string(),
            email: format!("{username}@x.com"),
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = MemoryCustomerStore::new();
        assert!(store.is_empty().await);

        let outcome = store.insert_if_absent(&customer("alice")).await.unwrap();
        assert_eq!(outcome, InsertOutcome::Created);

        let found = store.find_by_username("alice").await.unwrap();
        assert_eq!(found, Some(customer("alice")));
        assert_eq!(store.find_by_username("bob").await.unwrap(), None);
    }

    #[tokio::test]
    async fn second_insert_conflicts_and_keeps_original() {
        let store = MemoryCustomerStore::new();
        store.insert_if_absent(&customer("alice")).await.unwrap();

        let mut other = customer("alice");
        other.email = "other@x.com".to_string();
        let outcome = store.insert_if_absent(&other).await.unwrap();

        assert_eq!(outcome, InsertOutcome::Conflict);
        assert_eq!(store.len().await, 1);
        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.email, "alice@x.com");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_create_exactly_one() {
        let store = Arc::new(MemoryCustomerStore::new());
        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert_if_absent(&customer("alice")).await.unwrap()
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() == InsertOutcome::Created {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.len().await, 1);
    }
}

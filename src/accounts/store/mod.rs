//! Credential store abstraction.
//!
//! Uniqueness of usernames is the store's job: `insert_if_absent` must be a
//! single atomic operation, never a lookup followed by an insert.

mod memory;
mod postgres;

pub use memory::MemoryCustomerStore;
pub use postgres::PgCustomerStore;

use anyhow::Result;
use async_trait::async_trait;

use super::models::Customer;

/// Result of a conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Created,
    Conflict,
}

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Customer>>;

    /// Insert the record unless the username is already taken.
    async fn insert_if_absent(&self, customer: &Customer) -> Result<InsertOutcome>;

    /// Cheap liveness probe used by `/health`.
    async fn ping(&self) -> Result<()>;

    /// Release connections; called once on shutdown.
    async fn close(&self);
}

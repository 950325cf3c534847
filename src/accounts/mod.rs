//! Account registration and credential authentication.
//!
//! [`AccountService`] sits on top of a [`CustomerStore`] and a
//! [`PasswordHasher`]. It never touches sessions; the HTTP layer issues one
//! after [`AccountService::authenticate`] succeeds.

mod error;
pub mod models;
pub mod password;
pub mod store;

pub use error::{AccountError, MISSING_LOGIN_FIELDS, MISSING_REGISTRATION_FIELDS};
pub use models::{Customer, LoginRequest, RegistrationRequest};
pub use password::PasswordHasher;
pub use store::{CustomerStore, InsertOutcome, MemoryCustomerStore, PgCustomerStore};

use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct AccountService {
    store: Arc<dyn CustomerStore>,
    hasher: PasswordHasher,
}

impl AccountService {
    pub fn new(store: Arc<dyn CustomerStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    #[must_use]
    pub fn store(&self) -> &dyn CustomerStore {
        self.store.as_ref()
    }

    /// Create an account.
    ///
    /// # Errors
    /// - `Validation` if a field is missing (nothing is written)
    /// - `Duplicate` if the username is taken
    /// - `Infrastructure` if hashing or the store fails
    #[instrument(skip_all)]
    pub async fn register(&self, request: RegistrationRequest) -> Result<(), AccountError> {
        let mut new_customer = request.validate()?;

        let password = std::mem::take(&mut new_customer.password);
        let password_hash = self.hasher.hash_blocking(password).await?;
        let customer = new_customer.into_customer(password_hash);

        match self.store.insert_if_absent(&customer).await? {
            InsertOutcome::Created => {
                info!(username = %customer.username, "customer registered");
                Ok(())
            }
            InsertOutcome::Conflict => {
                info!(username = %customer.username, "registration rejected, username taken");
                Err(AccountError::Duplicate)
            }
        }
    }

    /// Verify credentials and return the authenticated username.
    ///
    /// # Errors
    /// - `Validation` if the username or password is missing
    /// - `Authentication` for an unknown user or a wrong password
    /// - `Infrastructure` if the store or hash verification fails
    #[instrument(skip_all)]
    pub async fn authenticate(&self, request: LoginRequest) -> Result<String, AccountError> {
        let credentials = request.validate()?;

        let Some(customer) = self.store.find_by_username(&credentials.username).await? else {
            warn!(username = %credentials.username, "login failed");
            return Err(AccountError::Authentication);
        };

        let matches = self
            .hasher
            .verify_blocking(credentials.password, customer.password_hash)
            .await?;
        if !matches {
            warn!(username = %customer.username, "login failed");
            return Err(AccountError::Authentication);
        }

        info!(username = %customer.username, "login succeeded");
        Ok(customer.username)
    }
}

use thiserror::Error;

pub const MISSING_REGISTRATION_FIELDS: &str = "All fields are required";
pub const MISSING_LOGIN_FIELDS: &str = "Missing username or password";

/// Failures surfaced by the account service.
///
/// Every variant maps to exactly one HTTP status in the API layer; the
/// `Infrastructure` message is never sent to clients.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    Validation(&'static str),
    // Same message for unknown users and wrong passwords.
    #[error("Invalid username or password")]
    Authentication,
    #[error("User already exists")]
    Duplicate,
    #[error(transparent)]
    Infrastructure(#[from] anyhow::Error),
}

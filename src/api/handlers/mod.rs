//! Route handlers.
//!
//! Each handler maps one request onto one account or session operation;
//! `AccountError` converts itself into the matching status code.

mod error;
pub mod health;
pub mod login;
pub mod logout;
mod payload;
pub mod register;
pub mod root;
pub mod session;

pub use payload::Payload;

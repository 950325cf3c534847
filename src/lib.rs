//! # Customers
//!
//! A small customer-account service: registration with salted password hashes,
//! session-based login and logout.
//!
//! ## Accounts
//!
//! Account records live in a `customers` table keyed by a unique username.
//! Registration is a single insert-if-absent, so two concurrent signups for the
//! same username can never both succeed.
//!
//! ## Sessions
//!
//! Sessions are kept in process memory and expire a fixed time after login
//! (two minutes by default, no sliding renewal). The browser only ever holds an
//! opaque, signed session identifier; the username is resolved server-side.

pub mod accounts;
pub mod api;
pub mod cli;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }
}

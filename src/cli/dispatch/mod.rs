//! Maps parsed command-line arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{
    session, ARG_DB_MAX_CONNECTIONS, ARG_DSN, ARG_FRONTEND_DIR, ARG_PORT,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(3000);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;
    let db_max_connections = matches
        .get_one::<u32>(ARG_DB_MAX_CONNECTIONS)
        .copied()
        .unwrap_or(5);
    let frontend_dir = matches
        .get_one::<String>(ARG_FRONTEND_DIR)
        .map_or_else(|| PathBuf::from("frontend"), PathBuf::from);

    let session_opts = session::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn: SecretString::from(dsn),
        db_max_connections,
        frontend_dir,
        session_secret: session_opts.secret,
        session_ttl: session_opts.ttl,
        session_cookie_secure: session_opts.cookie_secure,
    }))
}

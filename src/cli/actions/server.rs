use crate::{
    accounts::{AccountService, CustomerStore, PasswordHasher, PgCustomerStore},
    api::{self, load_landing_page, AppState},
    session::{SessionCookies, SessionManager},
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: SecretString,
    pub db_max_connections: u32,
    pub frontend_dir: PathBuf,
    pub session_secret: SecretString,
    pub session_ttl: Duration,
    pub session_cookie_secure: bool,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable, the frontend cannot be
/// read, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    Url::parse(args.dsn.expose_secret()).context("invalid database connection string")?;

    let landing_page = load_landing_page(&args.frontend_dir).await?;

    let store = Arc::new(
        PgCustomerStore::connect(args.dsn.expose_secret(), args.db_max_connections)
            .await
            .context("Could not connect to the database")?,
    );
    store
        .ensure_schema()
        .await
        .context("Could not create the customers table")?;

    let sessions = Arc::new(SessionManager::new(args.session_ttl));
    let cookies = SessionCookies::new(&args.session_secret, args.session_ttl)?
        .with_secure(args.session_cookie_secure);
    let accounts = AccountService::new(store.clone(), PasswordHasher::new());

    let state = Arc::new(AppState::new(accounts, sessions, cookies, landing_page));

    let result = api::new(args.port, state, &args.frontend_dir).await;

    store.close().await;

    result
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("dsn", redact_dsn(args.dsn.expose_secret())),
        ("db_max_connections", args.db_max_connections.to_string()),
        ("frontend_dir", args.frontend_dir.display().to_string()),
        ("session_ttl", format!("{}s", args.session_ttl.as_secs())),
        (
            "session_cookie_secure",
            args.session_cookie_secure.to_string(),
        ),
    ];

    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "{} {} - {}\n\nStartup configuration:",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in &entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("REDACTED"));
            }
            parsed.to_string()
        }
        Err(_) => "invalid-dsn".to_string(),
    }
}

fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}

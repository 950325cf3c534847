use anyhow::{Context, Result};
use std::{path::Path, sync::Arc};

use crate::{
    accounts::AccountService,
    session::{SessionCookies, SessionManager},
};

pub const LANDING_PAGE: &str = "home.html";

/// Everything the handlers share, injected once as an `Extension`.
pub struct AppState {
    accounts: AccountService,
    sessions: Arc<SessionManager>,
    cookies: SessionCookies,
    landing_page: String,
}

impl AppState {
    pub fn new(
        accounts: AccountService,
        sessions: Arc<SessionManager>,
        cookies: SessionCookies,
        landing_page: String,
    ) -> Self {
        Self {
            accounts,
            sessions,
            cookies,
            landing_page,
        }
    }

    #[must_use]
    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    #[must_use]
    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    #[must_use]
    pub fn cookies(&self) -> &SessionCookies {
        &self.cookies
    }

    #[must_use]
    pub fn landing_page(&self) -> &str {
        &self.landing_page
    }
}

/// Read the landing page served on `/` and after a successful login.
///
/// # Errors
/// Returns an error if `home.html` is missing from the frontend directory.
pub async fn load_landing_page(frontend_dir: &Path) -> Result<String> {
    let path = frontend_dir.join(LANDING_PAGE);
    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read landing page: {}", path.display()))
}

//! Signed session cookies.
//!
//! The cookie value is `<session uuid>.<base64url HMAC-SHA256(uuid)>`. A value
//! that does not verify is treated exactly like a missing cookie.

use anyhow::{anyhow, Result};
use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::{fmt, time::Duration};
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "customers_session";

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct SessionCookies {
    mac: HmacSha256,
    max_age: Duration,
    secure: bool,
}

impl fmt::Debug for SessionCookies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookies")
            .field("max_age", &self.max_age)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl SessionCookies {
    /// # Errors
    /// Returns an error if the secret is empty.
    pub fn new(secret: &SecretString, max_age: Duration) -> Result<Self> {
        let key = secret.expose_secret();
        if key.is_empty() {
            return Err(anyhow!("session secret must not be empty"));
        }
        let mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|err| anyhow!("invalid session secret: {err}"))?;
        Ok(Self {
            mac,
            max_age,
            secure: false,
        })
    }

    /// Add the `Secure` attribute; only useful when served over HTTPS.
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn sign(&self, id: Uuid) -> String {
        let id = id.to_string();
        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        let signature = Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes());
        format!("{id}.{signature}")
    }

    /// Return the session id if the signature checks out.
    #[must_use]
    pub fn verify(&self, value: &str) -> Option<Uuid> {
        let (id, signature) = value.split_once('.')?;
        let signature = Base64UrlUnpadded::decode_vec(signature).ok()?;
        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        mac.verify_slice(&signature).ok()?;
        Uuid::parse_str(id).ok()
    }

    /// `Set-Cookie` value for a fresh session.
    ///
    /// # Errors
    /// Returns an error if the header value cannot be built.
    pub fn session_cookie(&self, id: Uuid) -> Result<HeaderValue, InvalidHeaderValue> {
        let value = self.sign(id);
        let max_age = self.max_age.as_secs();
        let mut cookie = format!(
            "{SESSION_COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}"
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }

    /// `Set-Cookie` value that makes the browser drop the session cookie.
    ///
    /// # Errors
    /// Returns an error if the header value cannot be built.
    pub fn clear_cookie(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }

    /// Extract and verify the session id from the request's `Cookie` headers.
    #[must_use]
    pub fn session_id(&self, headers: &HeaderMap) -> Option<Uuid> {
        extract_cookie(headers, SESSION_COOKIE_NAME).and_then(|value| self.verify(&value))
    }
}

fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| val.trim().to_string())
        })
        .next()
}

use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, Key, SameSite};
use sha2::{Digest, Sha512};

use crate::domain::SessionId;
use crate::presentation::config::SessionSettings;

/// Attributes of the cookie carrying the [`SessionId`].
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub secure: bool,
    pub max_age: time::Duration,
}

impl SessionCookie {
    pub fn from_settings(settings: &SessionSettings) -> Self {
        let max_age_seconds = i64::try_from(settings.idle_timeout().as_secs()).unwrap_or(i64::MAX);
        Self {
            name: settings.cookie_name.clone(),
            secure: settings.secure,
            max_age: time::Duration::seconds(max_age_seconds),
        }
    }

    /// Returns the session carried by the jar, or mints a new one. Missing,
    /// tampered and malformed cookies all start a fresh session.
    ///
    /// The cookie is re-issued on every call so `Max-Age` slides with activity
    /// and lines up with the store's idle eviction.
    pub fn resolve(&self, jar: SignedCookieJar) -> (SignedCookieJar, SessionId) {
        let session_id = match jar
            .get(&self.name)
            .and_then(|cookie| SessionId::parse(cookie.value()))
        {
            Some(session_id) => session_id,
            None => {
                let session_id = SessionId::new();
                tracing::debug!(session_id = %session_id, "Starting new session");
                session_id
            }
        };

        let jar = jar.add(self.build(session_id));
        (jar, session_id)
    }

    fn build(&self, session_id: SessionId) -> Cookie<'static> {
        Cookie::build((self.name.clone(), session_id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(self.max_age)
            .build()
    }
}

/// Derives the cookie signing key from the configured secret. Without a
/// secret a random key is used and sessions do not survive a restart.
pub fn signing_key(secret: Option<&str>) -> Key {
    match secret.filter(|s| !s.is_empty()) {
        Some(secret) => {
            let digest = Sha512::digest(secret.as_bytes());
            Key::from(digest.as_slice())
        }
        None => {
            tracing::warn!("No session secret configured, using a random signing key");
            Key::generate()
        }
    }
}

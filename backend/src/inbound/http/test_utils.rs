//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite, time::Duration};

use super::session_config::SessionSettings;

/// Session settings for plain-HTTP tests: fresh key, no `Secure` flag.
pub fn test_session_settings() -> SessionSettings {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
        ttl: Duration::minutes(30),
    }
}

/// Production session middleware built from [`test_session_settings`].
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    test_session_settings().middleware()
}

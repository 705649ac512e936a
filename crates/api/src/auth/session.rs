//! Signed session tokens carried in the `session` cookie.
//!
//! A token is `base64url("{user_id}:{expires_at}:{signature}")` where the
//! signature is the hex HMAC-SHA256 of `"{user_id}:{expires_at}"` under the
//! server secret and `expires_at` is a Unix timestamp. Decoding rejects
//! anything malformed, unsigned, tampered with, or expired.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use cookie::time::Duration as CookieDuration;
use cookie::{Cookie, CookieBuilder, SameSite};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use scriptum_core::types::DbId;

use crate::config::env_or;

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "session";

/// Default session lifetime in hours (7 days).
const DEFAULT_TTL_HOURS: i64 = 168;

/// Configuration for session token signing and the cookie attributes.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 key used to sign and verify tokens.
    pub secret: String,
    /// Token and cookie lifetime in hours.
    pub ttl_hours: i64,
    /// Add the `Secure` attribute to the cookie.
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var             | Required | Default |
    /// |---------------------|----------|---------|
    /// | `SESSION_SECRET`    | **yes**  | --      |
    /// | `SESSION_TTL_HOURS` | no       | `168`   |
    /// | `COOKIE_SECURE`     | no       | `false` |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        Self {
            secret,
            ttl_hours: env_or("SESSION_TTL_HOURS", DEFAULT_TTL_HOURS),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(false),
        }
    }
}

/// Why a session token was rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("malformed session token")]
    Malformed,
    #[error("session token signature mismatch")]
    BadSignature,
    #[error("session expired")]
    Expired,
}

/// Issue a token for `user_id` valid for the configured lifetime.
pub fn issue_session_token(user_id: DbId, config: &SessionConfig) -> String {
    let expires_at = Utc::now() + Duration::hours(config.ttl_hours);
    encode_token(user_id, expires_at.timestamp(), &config.secret)
}

/// Validate a token and return the user id it was issued for.
pub fn decode_session_token(
    token: &str,
    config: &SessionConfig,
    now: DateTime<Utc>,
) -> Result<DbId, SessionError> {
    let raw = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|_| SessionError::Malformed)?;
    let decoded = String::from_utf8(raw).map_err(|_| SessionError::Malformed)?;

    let mut parts = decoded.splitn(3, ':');
    let (Some(user_part), Some(exp_part), Some(sig_part)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(SessionError::Malformed);
    };

    let user_id: DbId = user_part.parse().map_err(|_| SessionError::Malformed)?;
    let expires_at: i64 = exp_part.parse().map_err(|_| SessionError::Malformed)?;
    let signature = hex::decode(sig_part).map_err(|_| SessionError::Malformed)?;

    let mut mac = new_mac(&config.secret);
    mac.update(format!("{user_id}:{expires_at}").as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| SessionError::BadSignature)?;

    if expires_at <= now.timestamp() {
        return Err(SessionError::Expired);
    }
    Ok(user_id)
}

fn encode_token(user_id: DbId, expires_at: i64, secret: &str) -> String {
    let payload = format!("{user_id}:{expires_at}");
    let mut mac = new_mac(secret);
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    URL_SAFE_NO_PAD.encode(format!("{payload}:{signature}"))
}

fn new_mac(secret: &str) -> HmacSha256 {
    <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"))
}

// ---------------------------------------------------------------------------
// Cookie helpers
// ---------------------------------------------------------------------------

/// The `session` value from a `Cookie` request header, if present and
/// non-empty. Unparseable pairs are skipped.
pub fn session_from_cookie_header(header: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.value_trimmed().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value that stores `token` for the configured lifetime.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    base_cookie(token.to_string(), config)
        .max_age(CookieDuration::hours(config.ttl_hours))
        .build()
        .to_string()
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(config: &SessionConfig) -> String {
    let mut cookie = base_cookie(String::new(), config).build();
    cookie.make_removal();
    cookie.to_string()
}

fn base_cookie(value: String, config: &SessionConfig) -> CookieBuilder<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(config.cookie_secure)
}

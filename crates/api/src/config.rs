//! Process configuration, read once from the environment at startup.
//!
//! | Env Var                | Default                 |
//! |------------------------|-------------------------|
//! | `HOST`                 | `0.0.0.0`               |
//! | `PORT`                 | `3000`                  |
//! | `CORS_ORIGINS`         | `http://localhost:3001` |
//! | `REQUEST_TIMEOUT_SECS` | `30`                    |
//! | `UPLOAD_DIR`           | `./uploads`             |
//! | `UPLOAD_PUBLIC_PATH`   | `/uploads`              |
//! | `UPLOAD_MAX_BYTES`     | `10485760`              |
//!
//! Session variables are listed on [`SessionConfig::from_env`] and the
//! first-run admin on [`BootstrapAdmin::from_env`]. A value that does not
//! parse stops the server before it binds.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use scriptum_core::upload::DEFAULT_MAX_UPLOAD_BYTES;

use crate::auth::session::SessionConfig;
use crate::bootstrap::BootstrapAdmin;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Exact origins; the admin app and the marketing site usually differ.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub session: SessionConfig,
    pub upload: UploadConfig,
    /// Only consulted while the users table is empty.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Local disk storage behind `POST /api/upload`.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    /// Mount point for serving `dir`, always `/`-prefixed without a
    /// trailing slash.
    pub public_path: String,
    pub max_bytes: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins: split_origins(&env_or(
                "CORS_ORIGINS",
                "http://localhost:3001".to_string(),
            )),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            session: SessionConfig::from_env(),
            upload: UploadConfig {
                dir: env_or("UPLOAD_DIR", PathBuf::from("./uploads")),
                public_path: normalize_public_path(&env_or(
                    "UPLOAD_PUBLIC_PATH",
                    "/uploads".to_string(),
                ))
                .unwrap_or_else(|e| panic!("UPLOAD_PUBLIC_PATH: {e}")),
                max_bytes: env_or("UPLOAD_MAX_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            },
            bootstrap_admin: BootstrapAdmin::from_env(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `key` parsed as `T`, or `default` when unset.
///
/// # Panics
///
/// When the variable is set but does not parse.
pub fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value {raw:?}: {e}")),
        Err(_) => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// `uploads/` -> `/uploads`. The root cannot be used: uploads would shadow
/// `/api` and `/health`, and axum refuses to nest a service at `/`.
fn normalize_public_path(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(format!("{raw:?} must name a sub-path such as /uploads"));
    }
    Ok(format!("/{trimmed}"))
}

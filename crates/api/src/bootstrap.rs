//! First-run admin account.
//!
//! A fresh database has no users and therefore nobody who can log in to
//! create one. When the users table is empty and the `BOOTSTRAP_ADMIN_*`
//! variables are all set, [`ensure_admin`] creates an admin from them.

use scriptum_core::roles::ROLE_ADMIN;
use scriptum_core::validation::validate_email;
use scriptum_db::models::user::{CreateUser, User};
use scriptum_db::repositories::UserRepo;
use scriptum_db::DbPool;

use crate::auth::password::hash_new_password;
use crate::error::AppResult;

/// Credentials for the first admin account.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl BootstrapAdmin {
    /// Read `BOOTSTRAP_ADMIN_USERNAME`, `BOOTSTRAP_ADMIN_EMAIL` and
    /// `BOOTSTRAP_ADMIN_PASSWORD`. Returns `None` unless all are non-empty.
    pub fn from_env() -> Option<Self> {
        let read = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Some(Self {
            username: read("BOOTSTRAP_ADMIN_USERNAME")?,
            email: read("BOOTSTRAP_ADMIN_EMAIL")?,
            password: read("BOOTSTRAP_ADMIN_PASSWORD")?,
        })
    }
}

/// Create the bootstrap admin if the users table is empty.
///
/// Returns the created user, or `None` when nothing was done.
pub async fn ensure_admin(
    pool: &DbPool,
    admin: Option<&BootstrapAdmin>,
) -> AppResult<Option<User>> {
    let Some(admin) = admin else {
        return Ok(None);
    };

    if UserRepo::count(pool).await? > 0 {
        tracing::debug!("Users exist, skipping admin bootstrap");
        return Ok(None);
    }

    validate_email("BOOTSTRAP_ADMIN_EMAIL", &admin.email)?;
    let password_hash = hash_new_password(&admin.password)?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            email: admin.email.to_lowercase(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(Some(user))
}

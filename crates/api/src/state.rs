use std::sync::Arc;

use scriptum_db::DbPool;

use crate::config::ServerConfig;

/// Handed to every handler through `State<AppState>`; cloning copies two
/// reference counts.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use scriptum_api::bootstrap;
use scriptum_api::config::{env_or, ServerConfig};
use scriptum_api::router::build_app_router;
use scriptum_api::state::AppState;
use scriptum_db::DbPool;

const DEFAULT_LOG_FILTER: &str = "scriptum_api=debug,scriptum_db=info,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        addr = %config.bind_addr(),
        uploads = %config.upload.dir.display(),
        "Configuration loaded",
    );

    let pool = prepare_database().await;

    bootstrap::ensure_admin(&pool, config.bootstrap_admin.as_ref())
        .await
        .expect("Failed to bootstrap admin account");

    tokio::fs::create_dir_all(&config.upload.dir)
        .await
        .expect("Failed to create upload directory");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .expect("Failed to bind listener");
    tracing::info!(addr = %config.bind_addr(), "Scriptum API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Shut down cleanly");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify and migrate. Any failure here aborts startup.
async fn prepare_database() -> DbPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_connections = env_or("DATABASE_MAX_CONNECTIONS", scriptum_db::DEFAULT_MAX_CONNECTIONS);

    let pool = scriptum_db::create_pool(&url, max_connections)
        .await
        .expect("Failed to connect to database");
    scriptum_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    scriptum_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(max_connections, "Database ready");
    pool
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let which = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal = which, "Draining connections before shutdown");
}

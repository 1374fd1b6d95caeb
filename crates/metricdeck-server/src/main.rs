use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use metricdeck_instagram::InstagramClient;
use metricdeck_server::api::{build_app, AppState};
use metricdeck_store::{PgCredentialStore, PoolConfig};
use metricdeck_twitter::TwitterClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = metricdeck_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = PoolConfig {
        max_connections: config.db_max_connections,
        min_connections: config.db_min_connections,
        acquire_timeout_secs: config.db_acquire_timeout_secs,
    };
    let pool = metricdeck_store::connect_pool(&config.database_url, pool_config).await?;
    metricdeck_store::run_migrations(&pool).await?;

    let twitter = TwitterClient::with_base_url(
        config.upstream_timeout_secs,
        &config.twitter_api_base_url,
    )?;
    let instagram = InstagramClient::with_base_url(
        config.upstream_timeout_secs,
        &config.instagram_api_base_url,
    )?;

    let state = AppState {
        store: Arc::new(PgCredentialStore::new(pool)),
        twitter,
        instagram,
    };
    let app = build_app(state);

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting metricdeck server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

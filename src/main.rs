use std::net::SocketAddr;

use daily_planner_api::{
    config::Config, create_router, db::Storage, services::seed, spawn_cleanup_worker, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_planner_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();

    let storage = Storage::connect(&config).await?;
    tracing::info!(backend = storage.backend_name(), "Storage ready");

    seed::run(&storage, &config).await?;

    let addr = config.listen_addr();
    let state = AppState::new(storage, config);

    spawn_cleanup_worker(state.clone());

    let app = create_router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    // Client IP is needed by the login rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
